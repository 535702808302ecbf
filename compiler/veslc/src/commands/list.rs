use crate::demos::DEMOS;

/// Print the demo names with their descriptions.
pub fn list() {
    let width = DEMOS.iter().map(|demo| demo.name.len()).max().unwrap_or(0);
    for demo in DEMOS {
        println!("  {:width$}  {}", demo.name, demo.description);
    }
}
