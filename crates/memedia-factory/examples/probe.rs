//! Run with: cargo run -p memedia-factory --example probe -- <URL>...
//!
//! Checks each URL against the built-in support tables.

fn main() {
    let tables = memedia_factory::SupportTables::embedded();
    let urls: Vec<String> = std::env::args().skip(1).collect();

    if urls.is_empty() {
        println!("Usage: probe <URL>...");
        return;
    }

    for url in &urls {
        let result = memedia_factory::match_url(url, &tables);
        if result.accepted {
            println!("accept: {url}");
        } else {
            println!("reject: {url}");
            for diagnostic in &result.diagnostics {
                println!("  {}", diagnostic.message);
            }
        }
    }
}
