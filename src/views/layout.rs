//! Page Layout
//!
//! Vertical navigation bar plus the loading and error panes.

use leptos::prelude::*;

/// Navigation bar height, in `vh`
pub const LAYOUT_HEIGHT_VH: u32 = 120;

const ACTIVE_ICON_CLASS: &str = "active-icon";

/// Icons of the vertical navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIcon {
    /// Bills list
    Window,
    /// New bill form
    Mail,
}

impl NavIcon {
    pub const ALL: [NavIcon; 2] = [NavIcon::Window, NavIcon::Mail];

    fn element_id(&self) -> &'static str {
        match self {
            NavIcon::Window => "layout-icon1",
            NavIcon::Mail => "layout-icon2",
        }
    }

    pub fn test_id(&self) -> &'static str {
        match self {
            NavIcon::Window => "icon-window",
            NavIcon::Mail => "icon-mail",
        }
    }

    /// Class of this icon while `active` is highlighted
    pub fn class(&self, active: NavIcon) -> &'static str {
        if *self == active {
            ACTIVE_ICON_CLASS
        } else {
            ""
        }
    }
}

/// Navigation bar with exactly one `active-icon`
#[component]
pub fn VerticalLayout(
    active: NavIcon,
    #[prop(default = LAYOUT_HEIGHT_VH)] height_vh: u32,
) -> impl IntoView {
    view! {
        <div class="vertical-navbar" style=format!("height: {}vh;", height_vh)>
            <div class="layout-title">"Billed"</div>
            {NavIcon::ALL.into_iter().map(|icon| view! {
                <div id=icon.element_id() data-testid=icon.test_id() class=icon.class(active)>
                    <span class=format!("icon {}", icon.test_id())></span>
                </div>
            }).collect_view()}
        </div>
    }
}

/// Layout shared by every employee page
#[component]
pub fn Layout(active: NavIcon, children: Children) -> impl IntoView {
    view! {
        <div class="layout">
            <VerticalLayout active=active />
            {children()}
        </div>
    }
}

#[component]
pub fn LoadingPane() -> impl IntoView {
    view! { <div class="content" id="loading">"Loading..."</div> }
}

/// Store failure message, shown as-is
#[component]
pub fn ErrorPane(message: String) -> impl IntoView {
    view! {
        <div class="content">
            <div data-testid="error-message">{message}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_icons(active: NavIcon) -> Vec<&'static str> {
        NavIcon::ALL
            .into_iter()
            .filter(|icon| icon.class(active) == ACTIVE_ICON_CLASS)
            .map(|icon| icon.test_id())
            .collect()
    }

    #[test]
    fn test_single_active_icon() {
        assert_eq!(active_icons(NavIcon::Mail), vec!["icon-mail"]);
        assert_eq!(active_icons(NavIcon::Window), vec!["icon-window"]);
    }

    #[test]
    fn test_icon_ids_are_distinct() {
        assert_ne!(NavIcon::Window.element_id(), NavIcon::Mail.element_id());
        assert_eq!(NavIcon::Window.class(NavIcon::Mail), "");
    }
}
