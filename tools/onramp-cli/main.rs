use clap::Parser;
use onramp::prelude::*;
use std::fs;
use std::process;

/// Validate an onboarding flow document and simulate one visitor's
/// traversal through it.
#[derive(Parser)]
#[command(name = "onramp-cli", version)]
struct Cli {
    /// Path to the flow document (JSON).
    flow: String,

    /// Visitor identity; seeds a-b splits, so the same visitor always takes
    /// the same arm.
    #[arg(long, default_value = "local-visitor")]
    visitor: String,

    /// Optional JSON file of response key/value pairs collected so far.
    #[arg(long)]
    responses: Option<String>,

    /// Validate against the free tier's limits instead of the active tier.
    #[arg(long)]
    free_tier: bool,
}

fn main() {
    let cli = Cli::parse();

    let json = match fs::read_to_string(&cli.flow) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read flow file '{}': {}", cli.flow, e);
            process::exit(1);
        }
    };
    let flow = match Flow::from_json(&json) {
        Ok(flow) => flow,
        Err(e) => {
            eprintln!("Failed to parse flow document: {}", e);
            process::exit(1);
        }
    };
    println!("Loaded flow '{}' ({} nodes, {} logic blocks)", flow.title, flow.node_count(), flow.block_count());

    let tier = if cli.free_tier { Tier::Free } else { Tier::Active };
    match validate(&flow, tier.limits()) {
        Ok(()) => println!("Validation passed"),
        Err(report) => {
            eprintln!("Validation failed:");
            for violation in &report.violations {
                eprintln!("  - {}", violation);
            }
            process::exit(1);
        }
    }

    let mut session = Session::new(cli.visitor);
    if let Some(path) = &cli.responses {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Failed to read responses file '{}': {}", path, e);
                process::exit(1);
            }
        };
        session.responses = match serde_json::from_str(&content) {
            Ok(responses) => responses,
            Err(e) => {
                eprintln!("Failed to parse responses file '{}': {}", path, e);
                process::exit(1);
            }
        };
    }

    let Some(entry) = flow.entry_node() else {
        eprintln!("Flow has no entry node to start from");
        process::exit(1);
    };

    println!("\nSimulating traversal for visitor '{}':", session.visitor);
    println!("  1. {} ({})", entry.title, entry.id);

    let mut current = entry.id.clone();
    let mut step = 1usize;
    // A validated flow can still cycle through content nodes by design;
    // bound the walk so the simulation always terminates.
    let max_steps = flow.graph_len() * 2 + 1;
    for _ in 0..max_steps {
        let (next, trace) = match next_step_traced(&flow, &current, &session) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Routing failed at '{}': {}", current, e);
                process::exit(1);
            }
        };
        println!("     route: {}", trace);
        match next {
            NextStep::Node(node) => {
                step += 1;
                println!("  {}. {} ({})", step, node.title, node.id);
                current = node.id.clone();
            }
            NextStep::End => {
                println!("Flow complete after {} step(s)", step);
                return;
            }
        }
    }
    println!("Stopped after {} routed steps without reaching the end", max_steps);
}
