//! The command summary shown by `assist please`.

/// Static summary of every command form.
pub const HELP_TEXT: &str = "\
koopa commands:
  rd <path>            read a text file
  assist <please>      show this summary
  trv <path>           traverse to a directory
                         trv /  -- root directory
                         trv .  -- previous directory
                         trv .. -- current directory
  rlc <dest> <src>     relocate src into the dest directory
  god                  escalate permissions
  ls [path]            list a directory
  ./<path> [password]  run an executable (paths resolve like trv)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_every_command() {
        for cmd in ["rd ", "assist ", "trv ", "rlc ", "god ", "ls ", "./"] {
            assert!(HELP_TEXT.contains(cmd), "help is missing {cmd}");
        }
        assert!(HELP_TEXT.contains("trv .  -- previous directory"));
        assert!(HELP_TEXT.contains("trv .. -- current directory"));
    }
}
