pub mod badge;
pub mod color;

use crate::flags::{Flag, FLAGS};
use anyhow::Context;
use dotutils_core::config::Config;
use dotutils_core::console::Console;
use dotutils_core::network::Network;
use dotutils_core::registry::ValidatorRegistry;
use dotutils_core::resolver::{LineSource, Resolver};
use dotutils_core::slot::Signature;
use dotutils_core::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;

/// Everything a command needs to turn raw flag values into typed ones.
pub struct Session<'a> {
    pub console: &'a Console,
    pub config: &'a Config,
    signatures: HashMap<&'static str, Signature>,
    resolver: Resolver<'a>,
    input: RefCell<Box<dyn LineSource + 'a>>,
}

impl<'a> Session<'a> {
    pub fn new(
        console: &'a Console,
        config: &'a Config,
        validators: &'a ValidatorRegistry,
        network: &'a Network,
        input: Box<dyn LineSource + 'a>,
    ) -> anyhow::Result<Self> {
        let defaults = config.default_registry();
        let mut signatures = HashMap::with_capacity(FLAGS.len());
        for flag in FLAGS {
            let signature = Signature::declare(
                flag.metavars,
                flag.fallback.clone(),
                validators,
                &defaults,
                network,
            )
            .with_context(|| format!("invalid declaration for {}", flag.long))?;
            signatures.insert(flag.long, signature);
        }
        Ok(Self {
            console,
            config,
            signatures,
            resolver: Resolver::new(validators, network, console),
            input: RefCell::new(input),
        })
    }

    /// Resolve `raw` against `flag`'s metavars, prompting for anything
    /// missing or rejected.
    pub fn resolve(&self, flag: &Flag, raw: Vec<String>) -> anyhow::Result<Vec<Value>> {
        let signature = self
            .signatures
            .get(flag.long)
            .with_context(|| format!("{} is not a declared flag", flag.long))?;
        let mut input = self.input.borrow_mut();
        let values = self
            .resolver
            .resolve(signature, raw, &mut **input)
            .with_context(|| format!("failed to resolve {}", flag.long))?;
        tracing::debug!(flag = flag.long, count = values.len(), "resolved");
        Ok(values)
    }
}
