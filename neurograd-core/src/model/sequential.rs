use crate::autograd::{Graph, NodeId};
use crate::error::NeuraGradError;
use crate::nn::module::Module;
use crate::nn::parameter::ParamRef;

/// Ordered container applying its sub-modules one after another.
///
/// Sub-modules run, and report parameters, in insertion order. Each one is
/// registered under a unique name used as the prefix of its parameter names.
#[derive(Debug, Default)]
pub struct Sequential {
    modules: Vec<(String, Box<dyn Module>)>,
}

impl Sequential {
    pub fn new() -> Self {
        Sequential {
            modules: Vec::new(),
        }
    }

    /// Appends `module` under an explicit name.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the name is already taken.
    pub fn add_module(&mut self, name: &str, module: Box<dyn Module>) -> Result<(), NeuraGradError> {
        if self.modules.iter().any(|(n, _)| n == name) {
            return Err(NeuraGradError::InvalidConfiguration(format!(
                "duplicate module name '{}' in Sequential",
                name
            )));
        }
        self.modules.push((name.to_string(), module));
        Ok(())
    }

    /// Appends `module` named after its position ("0", "1", ...).
    pub fn push(&mut self, module: Box<dyn Module>) -> Result<(), NeuraGradError> {
        let name = self.modules.len().to_string();
        self.add_module(&name, module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Module for Sequential {
    fn forward(&self, graph: &mut Graph, input: NodeId) -> Result<NodeId, NeuraGradError> {
        let mut current = input;
        for (_, module) in &self.modules {
            current = module.forward(graph, current)?;
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<ParamRef> {
        self.modules
            .iter()
            .flat_map(|(_, module)| module.parameters())
            .collect()
    }

    fn named_parameters(&self) -> Vec<(String, ParamRef)> {
        let mut params = Vec::new();
        for (name, module) in &self.modules {
            for (param_name, param) in module.named_parameters() {
                params.push((format!("{}.{}", name, param_name), param));
            }
        }
        params
    }

    fn children(&self) -> Vec<&dyn Module> {
        self.modules.iter().map(|(_, m)| m.as_ref()).collect()
    }

    fn named_children(&self) -> Vec<(String, &dyn Module)> {
        self.modules
            .iter()
            .map(|(name, m)| (name.clone(), m.as_ref()))
            .collect()
    }
}
