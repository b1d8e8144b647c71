#![forbid(unsafe_code)]

//! The dock layout tree.
//!
//! [`DockLayout`] is the single shared state of the docking UI: panels
//! (ordered widget sequences along one axis), widgets (ordered tab
//! sequences with an active tab), tabs, and floating widgets (free
//! positioned wrappers around a widget). Entity maps are `BTreeMap`s so
//! iteration and serialization are deterministic.
//!
//! # Invariants
//!
//! 1. Every id referenced by a container exists exactly once as a key.
//! 2. Every tab belongs to exactly one widget.
//! 3. Every widget belongs to exactly one panel or exactly one floating
//!    wrapper, never both.
//! 4. A widget's active tab is a member of its tab sequence.
//! 5. `panel_order` / `floating_order` are permutations of the panel /
//!    floating key sets (`floating_order` is z-order, back to front).
//! 6. `next_id` is strictly greater than every raw id in the layout, so
//!    allocation can never collide with an existing id.
//!
//! [`DockLayout::validate`] checks all of the above and reports the first
//! violation; the reducer preserves them across every transition.

use std::collections::BTreeMap;
use std::fmt;

use berth_core::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::id::{PanelId, TabId, WidgetId};

/// Orientation of a panel's widget sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelAxis {
    Horizontal,
    Vertical,
}

/// What happens to a panel when its last widget leaves.
///
/// The original system keeps emptied panels around as zero-width
/// placeholders; hosts that prefer a tidy tree can opt into removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPanelPolicy {
    /// Keep the panel as an empty placeholder.
    #[default]
    Retain,
    /// Delete the panel and its order entry.
    Remove,
}

/// A single selectable content pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    pub id: TabId,
    pub label: String,
}

/// A container of tabs presented as one draggable/dockable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub id: WidgetId,
    /// Tab bar order, leftmost first. Never empty.
    pub tabs: Vec<TabId>,
    /// Must be a member of `tabs`.
    pub active_tab: TabId,
}

/// A docked, ordered arrangement of widgets along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub id: PanelId,
    pub axis: PanelAxis,
    pub widgets: Vec<WidgetId>,
}

/// A widget detached from any panel, positioned freely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloatingWidgetState {
    /// Same id as the wrapped widget.
    pub id: WidgetId,
    pub position: Point,
    pub bounds: Size,
}

/// Where a widget currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetLocation {
    /// Docked in the given panel.
    Panel(PanelId),
    /// Wrapped by a floating widget.
    Floating,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A violated layout invariant, found by validation or a builder call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownPanel(PanelId),
    UnknownWidget(WidgetId),
    UnknownTab(TabId),
    WidgetWithoutTabs(WidgetId),
    DuplicateTabOwner {
        tab: TabId,
        first: WidgetId,
        second: WidgetId,
    },
    DuplicateWidgetOwner(WidgetId),
    OrphanWidget(WidgetId),
    OrphanTab(TabId),
    ActiveTabNotMember {
        widget: WidgetId,
        active: TabId,
    },
    OrderMismatch {
        kind: &'static str,
    },
    StaleNextId {
        next: u64,
        max_existing: u64,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPanel(id) => write!(f, "panel {id} is not part of the layout"),
            Self::UnknownWidget(id) => write!(f, "widget {id} is not part of the layout"),
            Self::UnknownTab(id) => write!(f, "tab {id} is not part of the layout"),
            Self::WidgetWithoutTabs(id) => write!(f, "widget {id} has no tabs"),
            Self::DuplicateTabOwner { tab, first, second } => {
                write!(f, "tab {tab} is owned by widgets {first} and {second}")
            }
            Self::DuplicateWidgetOwner(id) => {
                write!(f, "widget {id} is referenced by more than one container")
            }
            Self::OrphanWidget(id) => write!(f, "widget {id} belongs to no container"),
            Self::OrphanTab(id) => write!(f, "tab {id} belongs to no widget"),
            Self::ActiveTabNotMember { widget, active } => {
                write!(f, "active tab {active} of widget {widget} is not in its tab sequence")
            }
            Self::OrderMismatch { kind } => {
                write!(f, "{kind} order does not match the {kind} key set")
            }
            Self::StaleNextId { next, max_existing } => {
                write!(f, "next id {next} is not greater than existing id {max_existing}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

// ---------------------------------------------------------------------------
// DockLayout
// ---------------------------------------------------------------------------

/// The shared layout tree. See the module docs for invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockLayout {
    pub(crate) panels: BTreeMap<PanelId, PanelState>,
    pub(crate) widgets: BTreeMap<WidgetId, WidgetState>,
    pub(crate) tabs: BTreeMap<TabId, TabState>,
    pub(crate) floating: BTreeMap<WidgetId, FloatingWidgetState>,
    pub(crate) panel_order: Vec<PanelId>,
    /// Z-order, back to front.
    pub(crate) floating_order: Vec<WidgetId>,
    pub(crate) next_id: u64,
    pub(crate) empty_panel_policy: EmptyPanelPolicy,
}

impl DockLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new(empty_panel_policy: EmptyPanelPolicy) -> Self {
        Self {
            panels: BTreeMap::new(),
            widgets: BTreeMap::new(),
            tabs: BTreeMap::new(),
            floating: BTreeMap::new(),
            panel_order: Vec::new(),
            floating_order: Vec::new(),
            next_id: 1,
            empty_panel_policy,
        }
    }

    /// The emptied-panel policy applied by the reducer.
    #[inline]
    #[must_use]
    pub fn empty_panel_policy(&self) -> EmptyPanelPolicy {
        self.empty_panel_policy
    }

    // --- Id allocation -----------------------------------------------------

    fn allocate_raw(&mut self) -> u64 {
        let raw = self.next_id;
        self.next_id += 1;
        raw
    }

    /// Allocate a tab id distinct from every id in the layout.
    pub fn allocate_tab_id(&mut self) -> TabId {
        TabId::new(self.allocate_raw())
    }

    /// Allocate a widget id distinct from every id in the layout.
    pub fn allocate_widget_id(&mut self) -> WidgetId {
        WidgetId::new(self.allocate_raw())
    }

    /// Allocate a panel id distinct from every id in the layout.
    pub fn allocate_panel_id(&mut self) -> PanelId {
        PanelId::new(self.allocate_raw())
    }

    // --- Setup-time construction -------------------------------------------

    /// Add an empty panel at the end of the panel order.
    pub fn add_panel(&mut self, axis: PanelAxis) -> PanelId {
        let id = self.allocate_panel_id();
        self.panels.insert(
            id,
            PanelState {
                id,
                axis,
                widgets: Vec::new(),
            },
        );
        self.panel_order.push(id);
        id
    }

    /// Add a widget with one tab per label to the end of a panel.
    ///
    /// The first tab becomes active.
    pub fn add_widget(
        &mut self,
        panel: PanelId,
        labels: &[&str],
    ) -> Result<WidgetId, LayoutError> {
        if !self.panels.contains_key(&panel) {
            return Err(LayoutError::UnknownPanel(panel));
        }
        let id = self.new_widget(labels)?;
        let state = self
            .panels
            .get_mut(&panel)
            .ok_or(LayoutError::UnknownPanel(panel))?;
        state.widgets.push(id);
        Ok(id)
    }

    /// Add a floating widget with one tab per label, frontmost.
    ///
    /// The first tab becomes active.
    pub fn add_floating_widget(
        &mut self,
        labels: &[&str],
        position: Point,
        bounds: Size,
    ) -> Result<WidgetId, LayoutError> {
        let id = self.new_widget(labels)?;
        self.floating.insert(
            id,
            FloatingWidgetState {
                id,
                position,
                bounds,
            },
        );
        self.floating_order.push(id);
        Ok(id)
    }

    /// Append a tab to an existing widget.
    pub fn add_tab(&mut self, widget: WidgetId, label: &str) -> Result<TabId, LayoutError> {
        if !self.widgets.contains_key(&widget) {
            return Err(LayoutError::UnknownWidget(widget));
        }
        let id = self.allocate_tab_id();
        self.tabs.insert(
            id,
            TabState {
                id,
                label: label.to_owned(),
            },
        );
        let state = self
            .widgets
            .get_mut(&widget)
            .ok_or(LayoutError::UnknownWidget(widget))?;
        state.tabs.push(id);
        Ok(id)
    }

    fn new_widget(&mut self, labels: &[&str]) -> Result<WidgetId, LayoutError> {
        let id = self.allocate_widget_id();
        if labels.is_empty() {
            return Err(LayoutError::WidgetWithoutTabs(id));
        }
        let mut tab_ids = Vec::with_capacity(labels.len());
        for label in labels {
            let tab = self.allocate_tab_id();
            self.tabs.insert(
                tab,
                TabState {
                    id: tab,
                    label: (*label).to_owned(),
                },
            );
            tab_ids.push(tab);
        }
        let active_tab = tab_ids[0];
        self.widgets.insert(
            id,
            WidgetState {
                id,
                tabs: tab_ids,
                active_tab,
            },
        );
        Ok(id)
    }

    // --- Read access -------------------------------------------------------

    /// Look up a panel.
    #[must_use]
    pub fn panel(&self, id: PanelId) -> Option<&PanelState> {
        self.panels.get(&id)
    }

    /// Look up a widget.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&id)
    }

    /// Look up a tab.
    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&TabState> {
        self.tabs.get(&id)
    }

    /// Look up a floating wrapper.
    #[must_use]
    pub fn floating_widget(&self, id: WidgetId) -> Option<&FloatingWidgetState> {
        self.floating.get(&id)
    }

    /// Panel order, as laid out.
    #[must_use]
    pub fn panel_order(&self) -> &[PanelId] {
        &self.panel_order
    }

    /// Floating z-order, back to front.
    #[must_use]
    pub fn floating_order(&self) -> &[WidgetId] {
        &self.floating_order
    }

    /// Where a widget currently lives, if it exists.
    #[must_use]
    pub fn widget_location(&self, id: WidgetId) -> Option<WidgetLocation> {
        if self.floating.contains_key(&id) {
            return Some(WidgetLocation::Floating);
        }
        self.panels
            .values()
            .find(|panel| panel.widgets.contains(&id))
            .map(|panel| WidgetLocation::Panel(panel.id))
    }

    /// Iterate all widgets.
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetState> {
        self.widgets.values()
    }

    /// Iterate all panels in layout order.
    pub fn panels(&self) -> impl Iterator<Item = &PanelState> {
        self.panel_order.iter().filter_map(|id| self.panels.get(id))
    }

    // --- Validation --------------------------------------------------------

    /// Check every layout invariant, reporting the first violation.
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.check_orders()?;
        self.check_widget_ownership()?;
        self.check_tab_ownership()?;
        self.check_next_id()
    }

    fn check_orders(&self) -> Result<(), LayoutError> {
        if self.panel_order.len() != self.panels.len()
            || self.panel_order.iter().any(|id| !self.panels.contains_key(id))
        {
            return Err(LayoutError::OrderMismatch { kind: "panel" });
        }
        if self.floating_order.len() != self.floating.len()
            || self
                .floating_order
                .iter()
                .any(|id| !self.floating.contains_key(id))
        {
            return Err(LayoutError::OrderMismatch { kind: "floating" });
        }
        Ok(())
    }

    fn check_widget_ownership(&self) -> Result<(), LayoutError> {
        let mut owned: BTreeMap<WidgetId, ()> = BTreeMap::new();
        for panel in self.panels.values() {
            for &widget in &panel.widgets {
                if !self.widgets.contains_key(&widget) {
                    return Err(LayoutError::UnknownWidget(widget));
                }
                if owned.insert(widget, ()).is_some() {
                    return Err(LayoutError::DuplicateWidgetOwner(widget));
                }
            }
        }
        for &widget in self.floating.keys() {
            if !self.widgets.contains_key(&widget) {
                return Err(LayoutError::UnknownWidget(widget));
            }
            if owned.insert(widget, ()).is_some() {
                return Err(LayoutError::DuplicateWidgetOwner(widget));
            }
        }
        for &widget in self.widgets.keys() {
            if !owned.contains_key(&widget) {
                return Err(LayoutError::OrphanWidget(widget));
            }
        }
        Ok(())
    }

    fn check_tab_ownership(&self) -> Result<(), LayoutError> {
        let mut owners: BTreeMap<TabId, WidgetId> = BTreeMap::new();
        for widget in self.widgets.values() {
            if widget.tabs.is_empty() {
                return Err(LayoutError::WidgetWithoutTabs(widget.id));
            }
            for &tab in &widget.tabs {
                if !self.tabs.contains_key(&tab) {
                    return Err(LayoutError::UnknownTab(tab));
                }
                if let Some(&first) = owners.get(&tab) {
                    return Err(LayoutError::DuplicateTabOwner {
                        tab,
                        first,
                        second: widget.id,
                    });
                }
                owners.insert(tab, widget.id);
            }
            if !widget.tabs.contains(&widget.active_tab) {
                return Err(LayoutError::ActiveTabNotMember {
                    widget: widget.id,
                    active: widget.active_tab,
                });
            }
        }
        for &tab in self.tabs.keys() {
            if !owners.contains_key(&tab) {
                return Err(LayoutError::OrphanTab(tab));
            }
        }
        Ok(())
    }

    fn check_next_id(&self) -> Result<(), LayoutError> {
        let max_existing = self
            .panels
            .keys()
            .map(|id| id.get())
            .chain(self.widgets.keys().map(|id| id.get()))
            .chain(self.tabs.keys().map(|id| id.get()))
            .max()
            .unwrap_or(0);
        if self.next_id <= max_existing {
            return Err(LayoutError::StaleNextId {
                next: self.next_id,
                max_existing,
            });
        }
        Ok(())
    }
}

impl Default for DockLayout {
    fn default() -> Self {
        Self::new(EmptyPanelPolicy::default())
    }
}
