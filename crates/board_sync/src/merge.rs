//! Server-wins layout merge

use board_model::Item;
use std::collections::HashSet;

/// Merge a freshly loaded server layout with a local layout.
///
/// The server is authoritative for every id it contains. Local items whose id
/// the server does not know are appended after the server items, in local
/// order.
pub fn merge_server_wins(server: Vec<Item>, local: &[Item]) -> Vec<Item> {
    let server_ids: HashSet<String> = server.iter().map(|item| item.id.clone()).collect();

    let mut merged = server;
    merged.extend(
        local
            .iter()
            .filter(|item| !server_ids.contains(&item.id))
            .cloned(),
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, x: f64, y: f64) -> Item {
        Item::new(id, "🎲", x, y).with_id(id)
    }

    #[test]
    fn test_server_position_wins() {
        let server = vec![item("1", 0.0, 0.0)];
        let local = vec![item("1", 9.0, 9.0), item("2", 4.0, 4.0)];

        let merged = merge_server_wins(server, &local);

        assert_eq!(merged, vec![item("1", 0.0, 0.0), item("2", 4.0, 4.0)]);
    }

    #[test]
    fn test_empty_local_returns_server() {
        let server = vec![item("1", 0.0, 0.0), item("2", 1.0, 1.0)];
        assert_eq!(merge_server_wins(server.clone(), &[]), server);
    }

    #[test]
    fn test_empty_server_keeps_local_order() {
        let local = vec![item("b", 0.0, 0.0), item("a", 1.0, 1.0)];
        assert_eq!(merge_server_wins(Vec::new(), &local), local);
    }
}
