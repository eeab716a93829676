//! Free-text command console state.
//!
//! The command line is forwarded verbatim and the response is shown as-is;
//! nothing here interprets either side.

use crate::core::pipeline::CommandOutcome;
use crate::core::render::RenderCtx;
use serde_json::Value;

/// Command output modal.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CommandConsole {
    /// Whether the output modal is visible.
    pub open: bool,
    /// Header line.
    pub header: String,
    /// Pretty-printed response or failure text.
    pub output: String,
    /// Whether a command is in flight.
    pub busy: bool,
}

impl CommandConsole {
    /// Mark a command as in flight.
    pub fn start(&mut self) {
        self.busy = true;
    }

    /// Apply a relay outcome; blank lines leave the console untouched.
    pub fn apply(&mut self, outcome: &CommandOutcome, ctx: &RenderCtx) {
        self.busy = false;
        match outcome {
            CommandOutcome::Ignored => {}
            CommandOutcome::Output(value) => {
                self.header = ctx.t("command.header");
                self.output = pretty(value);
                self.open = true;
            }
            CommandOutcome::Failed(reason) => {
                self.header = ctx.t("command.header");
                self.output = ctx.bundle.format("command.failed", "", &[("reason", reason)]);
                self.open = true;
            }
        }
    }

    /// Hide the output modal.
    pub fn close(&mut self) {
        self.open = false;
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::UiConfig;
    use crate::i18n::TranslationBundle;
    use serde_json::json;

    fn ctx() -> RenderCtx {
        RenderCtx::new(UiConfig::default(), TranslationBundle::default(), 2024)
    }

    #[test]
    fn output_is_pretty_printed_verbatim() {
        let ctx = ctx();
        let mut console = CommandConsole::default();
        console.start();
        console.apply(
            &CommandOutcome::Output(json!({ "error": "unknown command", "ok": false })),
            &ctx,
        );
        assert!(console.open);
        assert!(!console.busy);
        assert_eq!(console.header, "💻 指令執行結果：");
        assert_eq!(
            console.output,
            "{\n  \"error\": \"unknown command\",\n  \"ok\": false\n}"
        );
    }

    #[test]
    fn ignored_lines_leave_console_closed() {
        let ctx = ctx();
        let mut console = CommandConsole::default();
        console.apply(&CommandOutcome::Ignored, &ctx);
        assert_eq!(console, CommandConsole::default());
    }

    #[test]
    fn failures_are_reported_then_closable() {
        let ctx = ctx();
        let mut console = CommandConsole::default();
        console.apply(&CommandOutcome::Failed("offline".to_string()), &ctx);
        assert_eq!(console.output, "指令執行失敗：offline");
        console.close();
        assert!(!console.open);
        assert_eq!(console.output, "指令執行失敗：offline");
    }
}
