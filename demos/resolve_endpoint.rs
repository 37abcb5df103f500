//! Endpoint resolution example
//!
//! This example demonstrates:
//! - Building an EndpointResolver from a YAML config file
//! - Resolving endpoints for several parameter combinations
//! - Inspecting the path a resolution took through the diagram
//!
//! Run with `RUST_LOG=waypoint_sdk=debug` to see the resolution traces.

use std::sync::Arc;
use waypoint_sdk::{EndpointResolverBuilder, ResolveEndpoint};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    println!("=== Endpoint Resolution Example ===\n");

    let resolver = EndpointResolverBuilder::from_config_file("demos/resolver.yaml")?.build()?;
    let program = resolver.program();
    println!(
        "Loaded diagram v{}: {} parameters, {} conditions, {} nodes\n",
        program.version(),
        program.parameters().len(),
        program.condition_count(),
        program.node_count()
    );

    let cases: [(&str, &[(&str, bool)], Option<&str>); 5] = [
        ("us-west-2", &[], None),
        ("eu-central-1", &[("UseFIPS", true)], None),
        ("cn-north-1", &[("UseDualStack", true)], None),
        ("us-iso-east-1", &[("UseDualStack", true)], None),
        ("us-east-1", &[], Some("https://localhost:8443/proxy")),
    ];

    for (region, flags, endpoint) in cases {
        let params = flags
            .iter()
            .fold(resolver.params().set("Region", region), |builder, (name, value)| {
                builder.set(*name, *value)
            })
            .set_opt("Endpoint", endpoint)
            .build()?;

        println!("Parameters: {}", params);
        match resolver.resolve(&params) {
            Ok(endpoint) => {
                println!("  URL: {}", endpoint.url());
                for (name, values) in endpoint.headers() {
                    println!("  Header {}: {:?}", name, values);
                }
                if let Some(schemes) = endpoint.auth_schemes() {
                    println!("  Auth schemes: {}", serde_json::to_string(schemes)?);
                }
            }
            Err(err) => println!("  Error: {}", err),
        }
        println!();
    }

    // Detailed trace of a single resolution
    let params = resolver.params().set("UseFIPS", true).build()?;
    let resolution = resolver.resolve_traced(&params);
    println!("Trace for {}:", params);
    for visit in &resolution.trace.visits {
        println!(
            "  node {:>2}  condition {:>2}  -> {:<5} {}",
            visit.node,
            visit.condition,
            visit.outcome,
            if visit.cached { "(cached)" } else { "" }
        );
    }
    println!("  terminal: {:?}\n", resolution.trace.terminal);

    // Resolution behind the async trait, shared across tasks
    let shared: Arc<dyn ResolveEndpoint> = Arc::new(resolver.clone());
    let mut handles = Vec::new();
    for region in ["ap-southeast-1", "sa-east-1", "us-gov-west-1"] {
        let params = resolver.params().set("Region", region).build()?;
        let shared = Arc::clone(&shared);
        handles.push(tokio::spawn(async move { shared.resolve_endpoint(&params).await }));
    }
    println!("Concurrent resolutions:");
    for handle in handles {
        println!("  {}", handle.await??.url());
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "waypoint_sdk=info,waypoint_runtime=info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
