//! Terminal rendering of the board

use board_model::{Item, LayoutDiff};
use board_sync::LocalView;
use std::sync::{Mutex, PoisonError};

/// Format one item as a single line
pub fn format_item(item: &Item) -> String {
    let label = if item.is_text_note() {
        format!("\"{}\"", item.name)
    } else {
        format!("{} {}", item.emoji, item.name)
    };
    format!("{:<36}  {:<24} ({:.0}, {:.0})", item.id, label.trim(), item.x, item.y)
}

/// Print a whole layout
pub fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("(board is empty)");
        return;
    }
    for item in items {
        println!("{}", format_item(item));
    }
}

/// Layout shown in the terminal while watching the board
#[derive(Default)]
pub struct ConsoleView {
    items: Mutex<Vec<Item>>,
}

impl ConsoleView {
    /// Start from an already displayed layout
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl LocalView for ConsoleView {
    fn snapshot(&self) -> Vec<Item> {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn adopt(&self, items: Vec<Item>) {
        let mut current = self.items.lock().unwrap_or_else(PoisonError::into_inner);
        let diff = LayoutDiff::between(&current, &items);
        println!("-- {} --", diff.summary());
        print_items(&items);
        *current = items;
    }
}
