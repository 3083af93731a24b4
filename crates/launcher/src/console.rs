// Console output helpers for the launch workflow

use solana_sdk::native_token::LAMPORTS_PER_SOL;

/// Total number of numbered steps in a launch
pub const TOTAL_STEPS: u8 = 6;

/// `[n/6]` progress line, preceded by a blank line
pub fn step(n: u8, msg: &str) {
    println!("\n[{}/{}] {}", n, TOTAL_STEPS, msg);
}

/// Completed action, tagged `[OK]`
pub fn success(msg: &str) {
    println!("[OK] {}", msg);
}

/// Detail line for the operator, tagged `[INFO]`
pub fn info(msg: &str) {
    println!("[INFO] {}", msg);
}

/// Non-fatal problem, tagged `[WARN]` on stderr
pub fn warn(msg: &str) {
    eprintln!("[WARN] {}", msg);
}

/// Fatal problem, tagged `[ERROR]` on stderr
pub fn error(msg: &str) {
    eprintln!("[ERROR] {}", msg);
}

/// Lamports as a SOL amount for display
pub fn sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sol_display_amounts() {
        assert_eq!(sol(0), 0.0);
        assert_eq!(sol(100_000_000), 0.1);
        assert_eq!(sol(1_500_000_000), 1.5);
        assert_eq!(format!("{}", sol(100_000_000)), "0.1");
    }
}
