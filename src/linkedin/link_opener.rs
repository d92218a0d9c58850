// src/linkedin/link_opener.rs
use anyhow::{Context, Result};
use tracing::info;

/// Handle to one browser tab opened by a [`Browser`].
pub trait BrowserTab {
    fn is_closed(&self) -> bool;
    fn navigate(&mut self, url: &str) -> Result<()>;
    fn focus(&mut self);
    fn close(&mut self);
}

/// Seam between the tab-reuse logic and the actual browser.
pub trait Browser {
    type Tab: BrowserTab;

    fn open_tab(&self, url: &str) -> Result<Self::Tab>;
}

/// Owner of the single managed LinkedIn tab.
///
/// All people-search links of a session go through one opener: while the
/// previously opened tab is still open it is navigated and focused instead
/// of spawning another one. The slot holds at most one tab.
pub struct LinkedInLinkOpener<B: Browser> {
    browser: B,
    current_tab: Option<B::Tab>,
}

impl<B: Browser> LinkedInLinkOpener<B> {
    pub fn new(browser: B) -> Self {
        Self {
            browser,
            current_tab: None,
        }
    }

    /// Navigate the managed tab to `url`, opening it first if needed.
    pub fn open_or_reuse(&mut self, url: &str) -> Result<()> {
        if let Some(tab) = self.current_tab.as_mut() {
            if !tab.is_closed() {
                info!("Reusing LinkedIn tab for {}", url);
                tab.navigate(url)?;
                tab.focus();
                return Ok(());
            }
        }

        info!("Opening LinkedIn tab for {}", url);
        let tab = self.browser.open_tab(url)?;
        self.current_tab = Some(tab);
        Ok(())
    }

    /// Close the managed tab, if any, and forget its handle.
    pub fn close(&mut self) {
        if let Some(mut tab) = self.current_tab.take() {
            if !tab.is_closed() {
                tab.close();
            }
        }
    }

    pub fn has_open_tab(&self) -> bool {
        self.current_tab
            .as_ref()
            .map(|tab| !tab.is_closed())
            .unwrap_or(false)
    }
}

/// Browser backed by the operating system's default browser.
pub struct SystemBrowser;

/// Tab handle for the system browser. The desktop browser gives no
/// visibility into its tabs, so the handle counts as open for the lifetime
/// of the process and navigation re-dispatches the URL; the browser itself
/// decides where to load it.
pub struct SystemTab;

impl Browser for SystemBrowser {
    type Tab = SystemTab;

    fn open_tab(&self, url: &str) -> Result<SystemTab> {
        webbrowser::open(url).context("Failed to open the system browser")?;
        Ok(SystemTab)
    }
}

impl BrowserTab for SystemTab {
    fn is_closed(&self) -> bool {
        false
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        webbrowser::open(url).context("Failed to reach the system browser")
    }

    fn focus(&mut self) {
        // The OS brings the browser forward when a URL is dispatched.
    }

    fn close(&mut self) {
        // Desktop tabs cannot be closed remotely; dropping the handle is all
        // the opener needs.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum TabEvent {
        Opened(String),
        Navigated(String),
        Focused,
        Closed,
    }

    #[derive(Default)]
    struct FakeState {
        events: Vec<TabEvent>,
        closed: bool,
    }

    struct FakeBrowser {
        state: Rc<RefCell<FakeState>>,
    }

    struct FakeTab {
        state: Rc<RefCell<FakeState>>,
    }

    impl Browser for FakeBrowser {
        type Tab = FakeTab;

        fn open_tab(&self, url: &str) -> Result<FakeTab> {
            let mut state = self.state.borrow_mut();
            state.closed = false;
            state.events.push(TabEvent::Opened(url.to_string()));
            Ok(FakeTab {
                state: self.state.clone(),
            })
        }
    }

    impl BrowserTab for FakeTab {
        fn is_closed(&self) -> bool {
            self.state.borrow().closed
        }

        fn navigate(&mut self, url: &str) -> Result<()> {
            self.state
                .borrow_mut()
                .events
                .push(TabEvent::Navigated(url.to_string()));
            Ok(())
        }

        fn focus(&mut self) {
            self.state.borrow_mut().events.push(TabEvent::Focused);
        }

        fn close(&mut self) {
            let mut state = self.state.borrow_mut();
            state.closed = true;
            state.events.push(TabEvent::Closed);
        }
    }

    fn opener() -> (LinkedInLinkOpener<FakeBrowser>, Rc<RefCell<FakeState>>) {
        let state = Rc::new(RefCell::new(FakeState::default()));
        let browser = FakeBrowser {
            state: state.clone(),
        };
        (LinkedInLinkOpener::new(browser), state)
    }

    #[test]
    fn test_second_open_reuses_the_tab() {
        let (mut opener, state) = opener();
        opener.open_or_reuse("https://a.example").unwrap();
        opener.open_or_reuse("https://b.example").unwrap();

        assert_eq!(
            state.borrow().events,
            vec![
                TabEvent::Opened("https://a.example".to_string()),
                TabEvent::Navigated("https://b.example".to_string()),
                TabEvent::Focused,
            ]
        );
    }

    #[test]
    fn test_closed_tab_is_replaced() {
        let (mut opener, state) = opener();
        opener.open_or_reuse("https://a.example").unwrap();
        state.borrow_mut().closed = true;

        opener.open_or_reuse("https://b.example").unwrap();
        assert!(opener.has_open_tab());
        assert_eq!(
            state.borrow().events,
            vec![
                TabEvent::Opened("https://a.example".to_string()),
                TabEvent::Opened("https://b.example".to_string()),
            ]
        );
    }

    #[test]
    fn test_close_drops_the_slot() {
        let (mut opener, state) = opener();
        opener.open_or_reuse("https://a.example").unwrap();
        opener.close();

        assert!(!opener.has_open_tab());
        assert!(state.borrow().events.contains(&TabEvent::Closed));

        // Next open starts a fresh tab.
        opener.open_or_reuse("https://c.example").unwrap();
        assert_eq!(
            state.borrow().events.last(),
            Some(&TabEvent::Opened("https://c.example".to_string()))
        );
    }

    #[test]
    fn test_close_without_tab_is_noop() {
        let (mut opener, state) = opener();
        opener.close();
        assert!(state.borrow().events.is_empty());
    }
}
