//! Interactive menu loop: render, read keys, prompt, print results.
//!
//! Raw mode is only held while waiting on a single keypress; every line
//! prompt and every print happens in cooked mode so the terminal behaves
//! normally. The [`RawModeGuard`] makes sure no code path leaves the
//! terminal raw.

use std::io::{self, Write};
use std::num::{ParseFloatError, ParseIntError};

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    style::Stylize,
    terminal::{self, Clear, ClearType},
};

use crate::finance;

const BANNER: &str = "   Mortgage Monthly Repayment Calculator ";
const RULE: &str = "-----------------------------------------";
const INVALID_INPUT: &str =
    "\nInvalid input. Please enter valid numbers for the amounts, rates, and years.\n";

const MENU_OPTIONS: &[&str] = &[
    "Calculate Monthly Mortgage Payment (M)",
    "Calculate Affordable House Price (P)",
    "Exit",
];
const EXIT_INDEX: usize = 2;

/// Outcome of a menu interaction: a committed option, or the cancel
/// sentinel (Esc / Ctrl-C).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Item(usize),
    Cancel,
}

/// Highlight position within a fixed list of options. Plain modular
/// counter, wrapping at both ends.
struct MenuState {
    selected: usize,
    len: usize,
}

impl MenuState {
    fn new(len: usize) -> Self {
        Self { selected: 0, len }
    }

    /// Applies one keypress. `Some` commits the interaction; `None` means
    /// redraw and keep reading.
    fn handle_key(&mut self, key: KeyEvent) -> Option<Selection> {
        match key.code {
            KeyCode::Up => {
                self.selected = (self.selected + self.len - 1) % self.len;
                None
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.len;
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Selection::Item(self.selected)),
            KeyCode::Esc => Some(Selection::Cancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Selection::Cancel)
            }
            _ => None,
        }
    }
}

/// Keeps the terminal raw for exactly one keypress read.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs the menu loop until the user exits. Only terminal I/O failures
/// escape; every per-action error is recovered inside the loop.
pub fn run() -> Result<()> {
    loop {
        match select_from_menu(MENU_OPTIONS, "What would you like to do?")? {
            Selection::Cancel | Selection::Item(EXIT_INDEX) => {
                clear_screen()?;
                println!("\nThank you for using the Mortgage Calculator!");
                return Ok(());
            }
            Selection::Item(0) => run_action(monthly_payment_action)?,
            Selection::Item(1) => run_action(affordable_price_action)?,
            Selection::Item(_) => {}
        }
    }
}

/// Runs one action, converting its failures into console messages, then
/// pauses before handing control back to the menu.
fn run_action(action: fn() -> Result<()>) -> Result<()> {
    if let Err(err) = action() {
        if err.is::<ParseFloatError>() || err.is::<ParseIntError>() {
            println!("{INVALID_INPUT}");
        } else {
            println!("\nAn unexpected error occurred: {err}\n");
        }
    }
    pause()
}

fn select_from_menu(options: &[&str], prompt: &str) -> Result<Selection> {
    let mut state = MenuState::new(options.len());
    loop {
        clear_screen()?;
        println!("{RULE}");
        println!("{BANNER}");
        println!("{RULE}");
        println!("{prompt}");
        println!("\nUse ↑↓ arrow keys to navigate, Space/Enter to select. (Press ESC or Ctrl+C to quit)\n");
        for (i, option) in options.iter().enumerate() {
            if i == state.selected {
                println!("{}", format!("> [{}] {} <", i + 1, option).bold());
            } else {
                println!("  [{}] {}", i + 1, option);
            }
        }

        if let Some(selection) = state.handle_key(read_keypress()?) {
            return Ok(selection);
        }
    }
}

fn monthly_payment_action() -> Result<()> {
    clear_screen()?;
    println!("{RULE}");
    println!("   Calculate Monthly Mortgage Payment    ");
    println!("{RULE}");

    let principal: f64 = prompt("\nEnter the principal loan amount (e.g., 200000): £")?.parse()?;
    let annual_rate: f64 =
        prompt("Enter the annual interest rate (e.g., 4.5 for 4.5%): ")?.parse::<f64>()? / 100.0;
    let term_years: u32 = prompt("Enter the loan term in years (e.g., 25): ")?.parse()?;

    match finance::monthly_payment(principal, annual_rate, term_years) {
        Ok(payment) => {
            println!("\n--- Calculation Result ---");
            println!("Loan Amount:             {}", format_currency(principal));
            println!(
                "Annual Interest Rate:    {}",
                format_percent(annual_rate * 100.0)
            );
            println!("Loan Term:               {term_years} years");
            println!("{RULE}");
            println!("Estimated Monthly Payment: {}", format_currency(payment));
            println!("{RULE}\n");
        }
        Err(reason) => println!("\nError: {reason}\n"),
    }
    Ok(())
}

fn affordable_price_action() -> Result<()> {
    clear_screen()?;
    println!("{RULE}");
    println!("   Calculate Affordable House Price (P)    ");
    println!("{RULE}");

    let payment: f64 = prompt("\nEnter your desired monthly payment (e.g., 1110.00): £")?.parse()?;

    // Deposit is optional; a blank line means none.
    let deposit_text = prompt("How much deposit do you have? £")?;
    let deposit: f64 = if deposit_text.is_empty() {
        0.0
    } else {
        deposit_text.parse()?
    };

    let annual_rate: f64 =
        prompt("Enter the annual interest rate (e.g., 4.5 for 4.5%): ")?.parse::<f64>()? / 100.0;
    let term_years: u32 = prompt("Enter the loan term in years (e.g., 25): ")?.parse()?;

    match finance::max_loan_amount(payment, annual_rate, term_years) {
        Ok(principal) => {
            let deposit_pct = finance::deposit_percentage(principal, deposit);

            println!("\n--- Calculation Result ---");
            println!("Desired Monthly Payment: {}", format_currency(payment));
            println!(
                "Annual Interest Rate:    {}",
                format_percent(annual_rate * 100.0)
            );
            println!("Loan Term:               {term_years} years");
            println!("Deposit Amount:          {}", format_currency(deposit));
            println!("Deposit Percentage:      {}", format_percent(deposit_pct));
            println!("{RULE}");
            if deposit_pct < 10.0 {
                println!("You may not be granted a mortgage as your LTV ratio is more than 90%");
                println!("{RULE}");
            }
            println!(
                "Estimated House Price Could Afford (inc deposit): {}",
                format_currency(principal + deposit)
            );
            println!("Consisting of Deposit: {}", format_currency(deposit));
            println!("Maximum Loan Amount:   {}", format_currency(principal));
            println!("{RULE}\n");
        }
        Err(reason) => println!("\nError: {reason}\n"),
    }
    Ok(())
}

/// Prints `label`, reads one line, returns it trimmed.
fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Blocks until any key is pressed.
fn pause() -> Result<()> {
    println!("Press any key to return to the main menu...");
    read_keypress()?;
    Ok(())
}

/// Reads a single key press in raw mode, ignoring release/repeat events
/// and anything that is not a key.
fn read_keypress() -> Result<KeyEvent> {
    let _raw = RawModeGuard::new()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

fn clear_screen() -> Result<()> {
    execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(())
}

/// `£` plus thousands-grouped integer digits and exactly two decimals.
fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{sign}£{grouped}.{frac_part}")
}

fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn down_arrow_wraps_from_last_to_first() {
        let mut state = MenuState::new(3);
        state.selected = 2;
        assert_eq!(state.handle_key(press(KeyCode::Down)), None);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn up_arrow_wraps_from_first_to_last() {
        let mut state = MenuState::new(3);
        assert_eq!(state.handle_key(press(KeyCode::Up)), None);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn enter_and_space_commit_the_highlight() {
        let mut state = MenuState::new(3);
        state.selected = 1;
        assert_eq!(
            state.handle_key(press(KeyCode::Enter)),
            Some(Selection::Item(1))
        );
        assert_eq!(
            state.handle_key(press(KeyCode::Char(' '))),
            Some(Selection::Item(1))
        );
    }

    #[test]
    fn escape_cancels_from_any_position() {
        for start in 0..3 {
            let mut state = MenuState::new(3);
            state.selected = start;
            assert_eq!(state.handle_key(press(KeyCode::Esc)), Some(Selection::Cancel));
        }
    }

    #[test]
    fn ctrl_c_cancels() {
        let mut state = MenuState::new(3);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(key), Some(Selection::Cancel));
    }

    #[test]
    fn plain_c_does_not_cancel() {
        let mut state = MenuState::new(3);
        assert_eq!(state.handle_key(press(KeyCode::Char('c'))), None);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(200_000.0), "£200,000.00");
        assert_eq!(format_currency(1_234_567.891), "£1,234,567.89");
        assert_eq!(format_currency(999.5), "£999.50");
        assert_eq!(format_currency(0.0), "£0.00");
    }

    #[test]
    fn currency_keeps_sign_outside_symbol() {
        assert_eq!(format_currency(-1_500.0), "-£1,500.00");
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(9.10330376), "9.10%");
        assert_eq!(format_percent(4.5), "4.50%");
    }
}
