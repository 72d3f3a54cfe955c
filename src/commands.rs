//! `:` commands and their autocomplete

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
  pub name: &'static str,
  pub aliases: &'static [&'static str],
  pub description: &'static str,
}

/// All available commands
pub const COMMANDS: &[Command] = &[
  Command {
    name: "users",
    aliases: &["u", "user"],
    description: "Browse users",
  },
  Command {
    name: "products",
    aliases: &["p", "product"],
    description: "Browse products",
  },
  Command {
    name: "flush",
    aliases: &["f", "clear"],
    description: "Drop all cached pages",
  },
  Command {
    name: "quit",
    aliases: &["q", "exit"],
    description: "Exit djdash",
  },
];

/// Match quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
  ExactName,
  ExactAlias,
  NamePrefix,
  AliasPrefix,
  NameContains,
  AliasContains,
}

fn rank(cmd: &Command, input: &str) -> Option<Rank> {
  if cmd.name == input {
    Some(Rank::ExactName)
  } else if cmd.aliases.contains(&input) {
    Some(Rank::ExactAlias)
  } else if cmd.name.starts_with(input) {
    Some(Rank::NamePrefix)
  } else if cmd.aliases.iter().any(|a| a.starts_with(input)) {
    Some(Rank::AliasPrefix)
  } else if cmd.name.contains(input) {
    Some(Rank::NameContains)
  } else if cmd.aliases.iter().any(|a| a.contains(input)) {
    Some(Rank::AliasContains)
  } else {
    None
  }
}

/// Autocomplete suggestions for `input`, best match first
pub fn get_suggestions(input: &str) -> Vec<&'static Command> {
  let input = input.trim().to_lowercase();
  if input.is_empty() {
    return COMMANDS.iter().collect();
  }

  let mut matches: Vec<(&'static Command, Rank)> = COMMANDS
    .iter()
    .filter_map(|cmd| rank(cmd, &input).map(|r| (cmd, r)))
    .collect();
  // Stable sort keeps declaration order within a rank
  matches.sort_by_key(|(_, r)| *r);
  matches.into_iter().map(|(cmd, _)| cmd).collect()
}
