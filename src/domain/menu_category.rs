use serde::{Deserialize, Serialize};

// Menu card sections; stored as text in the menu_items table
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    Starters,
    Main,
    Dessert,
    Drinks,
    AlcoholicDrinks,
    Snacks,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Starters => "STARTERS",
            MenuCategory::Main => "MAIN",
            MenuCategory::Dessert => "DESSERT",
            MenuCategory::Drinks => "DRINKS",
            MenuCategory::AlcoholicDrinks => "ALCOHOLIC_DRINKS",
            MenuCategory::Snacks => "SNACKS",
        }
    }

    pub fn parse(value: &str) -> Result<MenuCategory, String> {
        match value {
            "STARTERS" => Ok(MenuCategory::Starters),
            "MAIN" => Ok(MenuCategory::Main),
            "DESSERT" => Ok(MenuCategory::Dessert),
            "DRINKS" => Ok(MenuCategory::Drinks),
            "ALCOHOLIC_DRINKS" => Ok(MenuCategory::AlcoholicDrinks),
            "SNACKS" => Ok(MenuCategory::Snacks),
            other => Err(format!("{} is not a known menu category", other)),
        }
    }
}
