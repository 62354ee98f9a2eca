//! Basic usage example for verdict

use serde_json::json;
use verdict::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let validator = Validator::new(and([
        member("name").size().gte(3),
        member("port").in_(interval(1, 65535)),
        member("tags").all().ne(""),
    ]));

    let config = json!({"name": "api", "port": 8080, "tags": ["public", "v2"]});
    match validator.check(&config) {
        Ok(()) => println!("✓ config is valid"),
        Err(e) => println!("✗ {e}"),
    }

    let broken = json!({"name": "api", "port": 8080, "tags": ["public", ""]});
    let outcome = validator.validate(&broken);
    println!("✗ {}: {}", outcome.status, outcome.text);
    println!("  failing members: {:?}", outcome.failed_members);

    // what would happen if we changed the port?
    let candidate = json!(70000);
    let outcome = validator.prevalidate(&config, &member("port"), &candidate);
    println!("port = 70000 -> {}: {}", outcome.status, outcome.text);
}
