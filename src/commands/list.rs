use colored::Colorize;

use crate::checks::Check;

/// Print every check in run order
pub fn execute() {
    println!("{}", "Checks (in run order):".bold());
    for check in Check::ALL {
        let marker = if check.is_disruptive() {
            " [changes power state]".yellow().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<14} {}{}",
            check.name().cyan(),
            check.description(),
            marker
        );
    }
}
