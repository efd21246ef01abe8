use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::menu_category::MenuCategory;

// One menu item and its requested quantity, held in session state only.
// Never persisted directly; it is the input from which an order is built.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CartLine{
    pub id: Uuid,
    pub name: String,
    // minor currency units
    #[serde(with = "crate::domain::money::as_major")]
    pub price: i64,
    pub quantity: i32,
    pub category: MenuCategory,
    pub image: Option<String>
}

// Which (restaurant, table) the cart currently belongs to
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableBinding{
    pub restaurant_id: Uuid,
    pub table_number: i32
}

// The diner's in-progress selection. A session-scoped value object whose
// operations are plain reducers over its own state; no persistence beyond
// the session cookie, state loss on session end is accepted behaviour.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Cart{
    lines: Vec<CartLine>,
    binding: Option<TableBinding>
}

impl Cart {
    pub fn new() -> Self{
        Cart::default()
    }

    pub fn lines(&self) -> &[CartLine]{
        &self.lines
    }

    pub fn binding(&self) -> Option<TableBinding>{
        self.binding
    }

    // Merge-by-id add. A line for an item already in the cart has its
    // quantity incremented instead of a duplicate row appended.
    // Adding from a different restaurant than the one currently bound
    // clears the cart first, so lines from two restaurants never mix.
    pub fn add_item(&mut self, line: CartLine, restaurant_id: Uuid, table_number: i32){
        if let Some(binding) = self.binding {
            if binding.restaurant_id != restaurant_id {
                self.lines.clear();
            }
        }

        self.binding = Some(TableBinding{ restaurant_id, table_number });

        match self.lines.iter_mut().find(|l| l.id == line.id){
            Some(existing) => existing.quantity += line.quantity,
            None => self.lines.push(line)
        }
    }

    pub fn remove_item(&mut self, id: Uuid){
        self.lines.retain(|line| line.id != id);
    }

    // Sets the quantity exactly (not additive); zero or below removes the line
    pub fn update_quantity(&mut self, id: Uuid, quantity: i32){
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == id){
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self){
        self.lines.clear();
        self.binding = None;
    }

    pub fn is_empty(&self) -> bool{
        self.lines.is_empty()
    }

    // Minor currency units
    pub fn total_price(&self) -> i64{
        self.lines.iter()
            .map(|line| line.price * line.quantity as i64)
            .sum()
    }

    pub fn total_item_count(&self) -> i64{
        self.lines.iter()
            .map(|line| line.quantity as i64)
            .sum()
    }
}
