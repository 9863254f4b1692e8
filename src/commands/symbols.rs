use crate::models::{Interval, POPULAR_SYMBOLS};

pub fn run() {
    println!("📋 Popular Symbols\n");

    for group in POPULAR_SYMBOLS {
        println!("🔹 {}", group.market);
        for (symbol, name) in group.entries {
            println!("   {:<12} {}", symbol, name);
        }
        println!();
    }

    println!("⏱️  Supported Intervals\n");
    println!("   {:<6} {:<16} {}", "Code", "Description", "Default window");
    for interval in Interval::all() {
        println!(
            "   {:<6} {:<16} {} days",
            interval.as_str(),
            interval.description(),
            interval.default_window_days()
        );
    }

    println!();
    println!("💡 Tip: exchange prefixes are accepted and stripped (NASDAQ:AAPL → AAPL)");
}
