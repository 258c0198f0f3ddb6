//! Dropdown state for enumerated fields, and the pointer-press registry that
//! lets an open dropdown close itself when the user presses elsewhere.
//!
//! The UI thread owns everything here, so plain `Rc<RefCell<..>>` is enough.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use super::schema::ChoiceOption;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min: (f32, f32),
    pub max: (f32, f32),
}

impl Region {
    pub fn contains(&self, (x, y): (f32, f32)) -> bool {
        x >= self.min.0 && x <= self.max.0 && y >= self.min.1 && y <= self.max.1
    }
}

#[derive(Debug, Default)]
struct Listener {
    region: Option<Region>,
    dismissed: bool,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Global pointer-press listeners. Only open selectors are registered.
#[derive(Debug, Clone, Default)]
pub struct OutsidePressRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl OutsidePressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> OutsidePressSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, Listener::default());
        OutsidePressSubscription { id, registry: self.inner.clone() }
    }

    /// Marks every listener whose region does not contain `point`.
    pub fn dispatch_press(&self, point: (f32, f32)) {
        for listener in self.inner.borrow_mut().listeners.values_mut() {
            let inside = listener.region.map(|region| region.contains(point)).unwrap_or(false);
            if !inside {
                listener.dismissed = true;
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Live registration; dropping it detaches the listener.
#[derive(Debug)]
pub struct OutsidePressSubscription {
    id: u64,
    registry: Rc<RefCell<RegistryInner>>,
}

impl OutsidePressSubscription {
    pub fn set_region(&self, region: Region) {
        if let Some(listener) = self.registry.borrow_mut().listeners.get_mut(&self.id) {
            listener.region = Some(region);
        }
    }

    fn dismissed(&self) -> bool {
        self.registry.borrow().listeners.get(&self.id).map(|l| l.dismissed).unwrap_or(true)
    }
}

impl Drop for OutsidePressSubscription {
    fn drop(&mut self) {
        // Registry borrows never outlive a method call, so this cannot conflict.
        self.registry.borrow_mut().listeners.remove(&self.id);
    }
}

/// Open/closed state of one dropdown. The subscription exists only while open.
#[derive(Debug)]
pub struct ChoiceSelector {
    field_id: &'static str,
    subscription: Option<OutsidePressSubscription>,
}

impl ChoiceSelector {
    pub fn new(field_id: &'static str) -> Self {
        Self { field_id, subscription: None }
    }

    pub fn field_id(&self) -> &'static str {
        self.field_id
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn toggle(&mut self, registry: &OutsidePressRegistry) {
        if self.is_open() {
            self.close();
        } else {
            self.subscription = Some(registry.subscribe());
        }
    }

    pub fn close(&mut self) {
        self.subscription = None;
    }

    /// Region covering the header and, while open, the option panel.
    pub fn set_region(&self, region: Region) {
        if let Some(subscription) = &self.subscription {
            subscription.set_region(region);
        }
    }

    /// Closes the panel if an outside press was dispatched since the last sync.
    pub fn sync(&mut self) {
        if self.subscription.as_ref().map(|s| s.dismissed()).unwrap_or(false) {
            self.close();
        }
    }

    pub fn select<F>(&mut self, code: i64, on_change: F)
    where
        F: FnOnce(&'static str, i64),
    {
        on_change(self.field_id, code);
        self.close();
    }

    pub fn selected_label(value: f64, options: &[ChoiceOption]) -> Option<&'static str> {
        options.iter().find(|option| option.code as f64 == value).map(|option| option.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[ChoiceOption] = &[
        ChoiceOption { code: 0, display: "Inactive" },
        ChoiceOption { code: 1, display: "Active" },
    ];

    fn region() -> Region {
        Region { min: (10.0, 10.0), max: (110.0, 40.0) }
    }

    #[test]
    fn test_toggle_acquires_and_releases() {
        let registry = OutsidePressRegistry::new();
        let mut selector = ChoiceSelector::new("active");

        selector.toggle(&registry);
        assert!(selector.is_open());
        assert_eq!(registry.active_count(), 1);

        selector.toggle(&registry);
        assert!(!selector.is_open());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_outside_press_closes_inside_press_does_not() {
        let registry = OutsidePressRegistry::new();
        let mut selector = ChoiceSelector::new("active");
        selector.toggle(&registry);
        selector.set_region(region());

        registry.dispatch_press((50.0, 20.0));
        selector.sync();
        assert!(selector.is_open());

        registry.dispatch_press((300.0, 300.0));
        selector.sync();
        assert!(!selector.is_open());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_closed_selector_ignores_presses() {
        let registry = OutsidePressRegistry::new();
        let mut selector = ChoiceSelector::new("smoke");
        registry.dispatch_press((0.0, 0.0));
        selector.sync();
        assert!(!selector.is_open());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_select_invokes_callback_and_closes() {
        let registry = OutsidePressRegistry::new();
        let mut selector = ChoiceSelector::new("active");
        selector.toggle(&registry);

        let mut received = None;
        selector.select(0, |field, code| received = Some((field, code)));

        assert_eq!(received, Some(("active", 0)));
        assert!(!selector.is_open());
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let registry = OutsidePressRegistry::new();
        {
            let mut selector = ChoiceSelector::new("alco");
            selector.toggle(&registry);
            assert_eq!(registry.active_count(), 1);
        }
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_dismissed_subscriptions_are_released_on_drop() {
        let registry = OutsidePressRegistry::new();
        let mut selectors: Vec<ChoiceSelector> =
            ["gender", "cholesterol", "gluc"].into_iter().map(ChoiceSelector::new).collect();
        for selector in &mut selectors {
            selector.toggle(&registry);
            selector.set_region(region());
        }
        assert_eq!(registry.active_count(), 3);

        registry.dispatch_press((500.0, 500.0));
        selectors.remove(1);
        assert_eq!(registry.active_count(), 2);

        drop(selectors);
        assert_eq!(registry.active_count(), 0);
    }

    #[test]
    fn test_selected_label_handles_unknown_values() {
        assert_eq!(ChoiceSelector::selected_label(1.0, OPTIONS), Some("Active"));
        assert_eq!(ChoiceSelector::selected_label(5.0, OPTIONS), None);
        assert_eq!(ChoiceSelector::selected_label(f64::NAN, OPTIONS), None);
    }
}
