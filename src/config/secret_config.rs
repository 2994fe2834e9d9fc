/// How one secret is read from the environment and checked
#[derive(Debug, Clone)]
pub struct SecretConfig {
    pub env_var: String,
    pub required: bool,
    /// None = no minimum
    pub min_length: Option<usize>,
}

impl SecretConfig {
    pub fn env_var(name: &str) -> Self {
        Self {
            env_var: name.to_string(),
            required: true,
            min_length: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }
}
