use crate::types::{EntityKind, Message};

impl Message {
    /// Split a message into a bot command and the rest of its text.
    ///
    /// The command only counts when a `bot_command` entity starts the message.
    /// It is returned without its leading `/` and without a trailing
    /// `@botname` mention; the arguments are the remaining text, trimmed.
    /// Otherwise the command is empty and the arguments are the whole text.
    pub fn command_and_args(&self) -> (&str, &str) {
        let text = self.text();
        let Some(entity) = self
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::BotCommand && e.offset == 0)
        else {
            return ("", text);
        };

        let (span, rest) = text.split_at(utf16_to_byte_index(text, entity.length));
        let command = span.strip_prefix('/').unwrap_or(span);
        let command = command.split_once('@').map_or(command, |(name, _)| name);
        (command, rest.trim())
    }
}

/// Byte index of the char boundary after `units` UTF-16 code units, clamped
/// to the end of `text`.
fn utf16_to_byte_index(text: &str, units: usize) -> usize {
    let mut seen = 0;
    for (idx, ch) in text.char_indices() {
        if seen >= units {
            return idx;
        }
        seen += ch.len_utf16();
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use crate::types::{EntityKind, Message, MessageEntity};

    fn message(text: &str, entities: &[(EntityKind, usize, usize)]) -> Message {
        Message {
            text: Some(text.to_string()),
            entities: entities
                .iter()
                .map(|&(kind, offset, length)| MessageEntity {
                    kind,
                    offset,
                    length,
                    url: None,
                })
                .collect(),
            ..Message::default()
        }
    }

    #[test]
    fn removes_leading_slash_from_command() {
        let msg = message("/eta", &[(EntityKind::BotCommand, 0, 4)]);
        assert_eq!(msg.command_and_args(), ("eta", ""));
    }

    #[test]
    fn trims_whitespace_from_args() {
        let msg = message("/cmd   hello  ", &[(EntityKind::BotCommand, 0, 4)]);
        assert_eq!(msg.command_and_args(), ("cmd", "hello"));
    }

    #[test]
    fn removes_bot_mention_from_command() {
        let msg = message("/cmd@username args", &[(EntityKind::BotCommand, 0, 13)]);
        assert_eq!(msg.command_and_args(), ("cmd", "args"));
    }

    #[test]
    fn returns_message_text_as_args_when_command_not_present() {
        let msg = message("args", &[]);
        assert_eq!(msg.command_and_args(), ("", "args"));
    }

    #[test]
    fn ignores_command_not_at_beginning_of_message() {
        let msg = message("Try this command: /cmd", &[(EntityKind::BotCommand, 18, 4)]);
        assert_eq!(msg.command_and_args(), ("", "Try this command: /cmd"));
    }

    #[test]
    fn ignores_other_entities_at_offset_zero() {
        let msg = message("@someone /cmd", &[(EntityKind::Mention, 0, 8)]);
        assert_eq!(msg.command_and_args(), ("", "@someone /cmd"));
    }

    #[test]
    fn counts_entity_length_in_utf16_units() {
        let msg = message("/старт аргумент", &[(EntityKind::BotCommand, 0, 6)]);
        assert_eq!(msg.command_and_args(), ("старт", "аргумент"));
    }

    #[test]
    fn clamps_entity_longer_than_text() {
        let msg = message("/go", &[(EntityKind::BotCommand, 0, 40)]);
        assert_eq!(msg.command_and_args(), ("go", ""));
    }

    #[test]
    fn message_without_text_has_no_command() {
        let msg = Message::default();
        assert_eq!(msg.command_and_args(), ("", ""));
    }
}
