//! Calculator factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use fibdrv_bignum::{Convolution, Karatsuba, MultiplierKind, Schoolbook};
use parking_lot::RwLock;

use crate::adding::Adding;
use crate::calculator::{Calculator, CoreCalculator, FibCalculator, FibError};
use crate::fastdoubling::FastDoubling;
use crate::options::Options;

/// Factory trait for creating calculators.
pub trait CalculatorFactory: Send + Sync {
    /// Get or create a calculator by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, FibError>;

    /// List all available calculator names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
///
/// Every calculator it hands out is configured from the same `Options`.
pub struct DefaultFactory {
    options: Options,
    cache: RwLock<HashMap<String, Arc<dyn Calculator>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create a factory whose calculators follow `options` (normalized first).
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        Self {
            options: options.normalize(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    fn create_calculator(&self, name: &str) -> Result<Arc<dyn Calculator>, FibError> {
        let core: Arc<dyn CoreCalculator> = match name {
            "fast" | "fastdoubling" => fast_doubling(&self.options),
            "adding" => Arc::new(Adding::new()),
            _ => return Err(FibError::Config(format!("unknown calculator: {name}"))),
        };
        Ok(Arc::new(FibCalculator::new(core, self.options.max_index)))
    }
}

/// Resolve the configured multiplier into a monomorphized engine.
fn fast_doubling(options: &Options) -> Arc<dyn CoreCalculator> {
    match options.multiplier {
        MultiplierKind::Schoolbook => Arc::new(FastDoubling::new(Schoolbook)),
        MultiplierKind::Karatsuba => {
            Arc::new(FastDoubling::new(Karatsuba::new(options.karatsuba_cutoff)))
        }
        MultiplierKind::Convolution => Arc::new(FastDoubling::new(Convolution)),
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, FibError> {
        // Check cache first
        if let Some(calc) = self.cache.read().get(name) {
            return Ok(Arc::clone(calc));
        }

        // Create and cache
        let calc = self.create_calculator(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&calc));
        Ok(calc)
    }

    fn available(&self) -> Vec<&str> {
        vec!["fast", "adding"]
    }
}
