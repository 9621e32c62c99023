use anyhow::{Result, bail};
use std::io::{self, IsTerminal, Write};

/// Something about to be taken out of the cart or wishlist.
#[derive(Debug, Clone, Copy)]
pub struct Removal<'a> {
  /// What is removed: a product name, or a count such as "all 3 line(s)".
  pub subject: &'a str,
  /// Where it is removed from: "cart" or "wishlist".
  pub from: &'a str,
}

impl Removal<'_> {
  fn question(&self) -> String {
    format!("Remove {} from the {}?", self.subject, self.from)
  }

  fn refusal(&self) -> String {
    format!(
      "Not removing {} from the {}: no terminal to confirm on. Use --yes to proceed.",
      self.subject, self.from
    )
  }
}

/// Ask before removing from a collection. `yes` skips the prompt; without a
/// terminal the removal is refused.
pub fn confirm_removal(removal: Removal<'_>, yes: bool) -> Result<bool> {
  if yes {
    return Ok(true);
  }

  if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
    bail!(removal.refusal());
  }

  write!(io::stderr(), "{} [y/N] ", removal.question())?;
  io::stderr().flush()?;

  let mut input = String::new();
  io::stdin().read_line(&mut input)?;

  Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
  matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
