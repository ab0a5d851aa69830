//! Stacked LSTM regressor built on Burn

use super::config::LstmRegressorConfig;
use burn::{
    module::Module,
    nn::{Dropout, DropoutConfig, Linear, LinearConfig, Lstm, LstmConfig},
    tensor::{backend::Backend, Tensor},
};

/// Two recurrent layers followed by two dense layers
///
/// Input `[batch, seq_len, input_size]`, output `[batch, output_size]`.
#[derive(Module, Debug)]
pub struct LstmRegressor<B: Backend> {
    /// First recurrent layer, returns the full sequence
    lstm1: Lstm<B>,
    /// Dropout between the recurrent layers (active only when training)
    dropout: Dropout,
    /// Second recurrent layer, only its last hidden state is used
    lstm2: Lstm<B>,
    /// Hidden dense layer
    dense: Linear<B>,
    /// Output layer
    output: Linear<B>,
}

impl<B: Backend> LstmRegressor<B> {
    pub fn new(config: &LstmRegressorConfig, device: &B::Device) -> Self {
        Self {
            lstm1: LstmConfig::new(config.input_size, config.hidden_size, true).init(device),
            dropout: DropoutConfig::new(config.dropout).init(),
            lstm2: LstmConfig::new(config.hidden_size, config.hidden_size, true).init(device),
            dense: LinearConfig::new(config.hidden_size, config.dense_size).init(device),
            output: LinearConfig::new(config.dense_size, config.output_size).init(device),
        }
    }

    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let (sequence, _) = self.lstm1.forward(x, None);
        let sequence = self.dropout.forward(sequence);

        // Last hidden state of the second layer: [batch, hidden_size]
        let (_, state) = self.lstm2.forward(sequence, None);

        let x = self.dense.forward(state.hidden);
        self.output.forward(x)
    }
}
