use crate::api::Food;

/// Everything the dashboard displays
///
/// Transitions never talk to the network: the controller calls them once a request resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Local projection of the remote collection, in server order then creation order
    pub items: Vec<Food>,
    /// Item selected in the list for edition
    pub pending_edit: Option<Food>,
    pub create_form_open: bool,
    pub edit_form_open: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collection was fetched: it replaces the local list as is
    pub fn load_succeeded(&mut self, foods: Vec<Food>) {
        self.items = foods;
    }

    /// The server created `food`: append it, dropping any stale entry with the same id
    pub fn create_succeeded(&mut self, food: Food) {
        self.items.retain(|item| item.id != food.id);
        self.items.push(food);
    }

    /// The server stored `food`: replace the entry with the same id in place
    ///
    /// A stale edit target with that id is refreshed too.
    pub fn update_succeeded(&mut self, food: Food) {
        for item in self.items.iter_mut().filter(|item| item.id == food.id) {
            *item = food.clone();
        }
        if let Some(pending) = self.pending_edit.as_mut().filter(|p| p.id == food.id) {
            *pending = food;
        }
    }

    /// Drop every entry with the given id, keeping the order of the others
    pub fn delete_succeeded(&mut self, id: u32) {
        self.items.retain(|item| item.id != id);
        if self.pending_edit.as_ref().is_some_and(|p| p.id == id) {
            self.pending_edit = None;
        }
    }

    /// Select `food` for edition and show the edit form
    pub fn select_edit_target(&mut self, food: Food) {
        self.pending_edit = Some(food);
        self.edit_form_open = true;
    }

    pub fn toggle_create_form(&mut self) {
        self.create_form_open = !self.create_form_open;
    }

    pub fn toggle_edit_form(&mut self) {
        self.edit_form_open = !self.edit_form_open;
    }

    /// Cached item with the given id
    pub fn find(&self, id: u32) -> Option<&Food> {
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn food(id: u32, name: &str) -> Food {
        Food {
            id,
            name: name.to_string(),
            description: String::new(),
            price: "1.00".to_string(),
            available: true,
            image: String::new(),
        }
    }

    fn ids(state: &DashboardState) -> Vec<u32> {
        state.items.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_load_replaces_everything() {
        let mut state = DashboardState::new();
        state.load_succeeded(vec![food(9, "Old")]);
        state.load_succeeded(vec![food(3, "Soup"), food(1, "Rice")]);
        assert_eq!(ids(&state), vec![3, 1]);
    }

    #[test]
    fn test_create_appends_last() {
        let mut state = DashboardState::new();
        state.load_succeeded(vec![food(1, "Rice"), food(2, "Beans")]);

        state.create_succeeded(food(5, "Soup"));
        assert_eq!(ids(&state), vec![1, 2, 5]);

        // an id already cached is not duplicated
        state.create_succeeded(food(1, "Fresh rice"));
        assert_eq!(ids(&state), vec![2, 5, 1]);
        assert_eq!(state.find(1).unwrap().name, "Fresh rice");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut state = DashboardState::new();
        state.load_succeeded(vec![food(1, "Rice"), food(2, "Beans"), food(3, "Soup")]);
        state.select_edit_target(food(2, "Beans"));

        state.update_succeeded(food(2, "Black beans"));

        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(state.items[1].name, "Black beans");
        assert_eq!(state.items[0].name, "Rice");
        assert_eq!(state.pending_edit.as_ref().unwrap().name, "Black beans");

        // unknown ids leave the list alone
        let before = state.clone();
        state.update_succeeded(food(42, "Ghost"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_delete() {
        let mut state = DashboardState::new();
        state.load_succeeded(vec![food(1, "Rice"), food(2, "Beans"), food(3, "Soup")]);
        state.select_edit_target(food(2, "Beans"));

        state.delete_succeeded(42);
        assert_eq!(ids(&state), vec![1, 2, 3]);

        state.delete_succeeded(2);
        assert_eq!(ids(&state), vec![1, 3]);
        assert!(state.pending_edit.is_none());

        state.delete_succeeded(1);
        assert_eq!(ids(&state), vec![3]);
    }

    #[test]
    fn test_toggles() {
        let mut state = DashboardState::new();
        assert!(!state.create_form_open && !state.edit_form_open);

        state.toggle_create_form();
        assert!(state.create_form_open);
        assert!(!state.edit_form_open);
        state.toggle_create_form();
        assert!(!state.create_form_open);

        state.select_edit_target(food(1, "Rice"));
        assert!(state.edit_form_open);
        state.toggle_edit_form();
        assert!(!state.edit_form_open);
        assert!(state.pending_edit.is_some());
        assert!(state.items.is_empty());
    }
}
