//! Terminal output helpers

use console::style;
use maze_adapter::JournalStats;
use maze_domain::model::agent::Agent;

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", style("⚠").yellow(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// One line per surviving agent, e.g. `player1 (human) at (64, 64) keys: rock, paper`
pub fn agent_line(agent: &Agent) -> String {
    let control = if agent.is_automated() { "ai" } else { "human" };
    let keys = if agent.keys().is_empty() {
        "none".to_string()
    } else {
        agent
            .keys()
            .iter()
            .map(|k| k.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "{} ({}) at ({:.0}, {:.0}) keys: {}",
        agent.id(),
        control,
        agent.position().x,
        agent.position().y,
        keys
    )
}

/// End-of-run summary
pub fn print_summary(run_id: &str, world_time_ms: u64, survivors: &[Agent], stats: &JournalStats) {
    println!();
    println!("{}", style(format!("Run {}", run_id)).bold());
    println!("  simulated time : {:.1}s", world_time_ms as f64 / 1000.0);
    println!("  duels          : {}", stats.combats);
    println!("  eliminations   : {}", stats.eliminations);
    println!("  doors opened   : {}", stats.doors_opened);
    println!("  access denied  : {}", stats.denials);
    println!("  keys collected : {}", stats.keys_collected);
    println!("{}", style("Survivors").bold());
    for agent in survivors {
        println!("  {}", agent_line(agent));
    }
}
