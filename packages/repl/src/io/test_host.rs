//! In-memory [`IoHost`] for driving the shell loop from tests.

use std::collections::VecDeque;

use super::{InputLine, IoError, IoHost, Output, OutputStyle, PromptConfig, Signal};

/// Scripted input and captured output.
///
/// Queued lines and signals are consumed in order. Before each line the loop
/// checks for a signal, so a queued signal takes effect before any remaining
/// lines.
#[derive(Debug, Default)]
pub struct TestHost {
    inputs: VecDeque<String>,
    signals: VecDeque<Signal>,
    outputs: Vec<Output>,
    prompts: Vec<PromptConfig>,
    flushes: usize,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that will feed `lines` in order.
    pub fn with_inputs(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut host = Self::new();
        for line in lines {
            host.queue_input(line);
        }
        host
    }

    pub fn queue_input(&mut self, line: impl Into<String>) {
        self.inputs.push_back(line.into());
    }

    pub fn queue_signal(&mut self, signal: Signal) {
        self.signals.push_back(signal);
    }

    pub fn output(&self) -> &[Output] {
        &self.outputs
    }

    /// Text of every output with `style`, in order.
    pub fn output_with_style(&self, style: OutputStyle) -> Vec<&str> {
        self.outputs
            .iter()
            .filter(|o| o.style == style)
            .map(|o| o.text.as_str())
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Error)
    }

    pub fn normal(&self) -> Vec<&str> {
        self.output_with_style(OutputStyle::Normal)
    }

    /// Every prompt the loop rendered, oldest first.
    pub fn prompts(&self) -> &[PromptConfig] {
        &self.prompts
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        // Out of script: end the session the way a closed terminal would
        if self.inputs.is_empty() && self.signals.is_empty() {
            self.signals.push_back(Signal::Eof);
        }
        Ok(())
    }

    fn read_input(&mut self) -> Result<Option<InputLine>, IoError> {
        Ok(self.inputs.pop_front().map(|line| InputLine { line }))
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.signals.pop_front())
    }

    fn write_output(&mut self, output: Output) -> Result<(), IoError> {
        self.outputs.push(output);
        Ok(())
    }

    fn write_prompt(&mut self, config: PromptConfig) -> Result<(), IoError> {
        self.prompts.push(config);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_consumed_in_order() {
        let mut host = TestHost::with_inputs(["ls", "pwd"]);
        host.queue_input("tree");

        for expected in ["ls", "pwd", "tree"] {
            assert_eq!(host.read_input().unwrap().unwrap().line, expected);
        }
        assert!(host.read_input().unwrap().is_none());
    }

    #[test]
    fn exhausted_script_signals_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert!(matches!(host.read_signal().unwrap(), Some(Signal::Eof)));
    }

    #[test]
    fn pending_input_suppresses_eof() {
        let mut host = TestHost::with_inputs(["ls"]);
        host.wait_for_input().unwrap();
        assert!(host.read_signal().unwrap().is_none());
    }

    #[test]
    fn outputs_filter_by_style() {
        let mut host = TestHost::new();
        host.write_output(Output::normal("listing")).unwrap();
        host.write_output(Output::error("/x: no such entry")).unwrap();
        host.write_output(Output::banner("hi")).unwrap();

        assert_eq!(host.normal(), vec!["listing"]);
        assert_eq!(host.errors(), vec!["/x: no such entry"]);
        assert_eq!(host.output().len(), 3);
    }

    #[test]
    fn prompts_and_flushes_are_recorded() {
        let mut host = TestHost::new();
        host.write_prompt(PromptConfig {
            entry_count: 3,
            current_path: "/a".to_string(),
        })
        .unwrap();
        host.flush().unwrap();

        assert_eq!(host.prompts()[0].current_path, "/a");
        assert_eq!(host.flush_count(), 1);
    }
}
