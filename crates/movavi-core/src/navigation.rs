/// The fixed set of pages the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    About,
    Help,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Page::Home, Page::About, Page::Help]
    }

    pub fn id(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Help => "help",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().into_iter().find(|page| page.id() == id)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Chat",
            Page::About => "About",
            Page::Help => "Help",
        }
    }
}

/// Which page is visible and whether the navigation menu is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub active: Page,
    pub menu_open: bool,
}

impl NavigationState {
    /// Show the page with `page_id` and close the menu.
    ///
    /// Unknown ids leave the state untouched and return `false`.
    pub fn navigate_to(&mut self, page_id: &str) -> bool {
        let Some(page) = Page::from_id(page_id) else {
            tracing::debug!(page_id, "ignoring navigation to unknown page");
            return false;
        };
        self.active = page;
        self.menu_open = false;
        true
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn is_active(&self, page: Page) -> bool {
        self.active == page
    }
}
