// src/alert/evaluate.rs

use anyhow::{Context, Result};
use regex::Regex;

use crate::alert::{Evaluation, Evaluator};

/// Evaluator backed by regexes.
///
/// Two independent checks run over the post text:
/// - any `http(s)://` URL is extracted (spam posts almost always carry one)
/// - each configured watchword pattern contributes its matched snippets
///
/// Patterns come from `[alerts].watchwords` in the config and are validated
/// at load time; `new` re-checks them anyway so the type stands on its own.
pub struct RegexEvaluator {
    url_re: Regex,
    watchwords: Vec<Regex>,
}

impl RegexEvaluator {
    pub fn new(watchwords: &[String]) -> Result<Self> {
        let url_re = Regex::new(r"https?://\S+").context("compiling URL regex")?;

        let watchwords = watchwords
            .iter()
            .map(|pattern| {
                Regex::new(pattern)
                    .with_context(|| format!("compiling watchword pattern '{}'", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { url_re, watchwords })
    }
}

impl Evaluator for RegexEvaluator {
    fn evaluate(&self, text: &str) -> Evaluation {
        let urls = self
            .url_re
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();

        let entries = self
            .watchwords
            .iter()
            .flat_map(|re| re.find_iter(text))
            .map(|m| m.as_str().to_string())
            .collect();

        Evaluation { urls, entries }
    }
}
