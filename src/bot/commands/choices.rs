//! Fixed option lists shown as dropdowns in slash commands.

use crate::core::menu::Category;

/// Menu category as a slash-command choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum CategoryChoice {
    /// Main dishes
    #[name = "Entrée"]
    Main,
    /// Starters and sides
    #[name = "Appetizer"]
    Appetizer,
    /// Sweets
    #[name = "Dessert"]
    Dessert,
    /// Drinks
    #[name = "Beverage"]
    Beverage,
}

impl From<CategoryChoice> for Category {
    fn from(choice: CategoryChoice) -> Self {
        match choice {
            CategoryChoice::Appetizer => Self::Appetizer,
            CategoryChoice::Main => Self::Main,
            CategoryChoice::Dessert => Self::Dessert,
            CategoryChoice::Beverage => Self::Beverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_choice_maps_to_category() {
        assert_eq!(Category::from(CategoryChoice::Main), Category::Main);
        assert_eq!(Category::from(CategoryChoice::Beverage), Category::Beverage);
    }
}
