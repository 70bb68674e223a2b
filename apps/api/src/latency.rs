//! Simulated service latency. Each operation awaits a fixed base delay scaled by
//! `LATENCY_SCALE`, so clients see realistic loading states without real I/O.

use std::time::Duration;

use tracing::trace;

/// Service operations that carry an artificial delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Register,
    ValidateToken,
    AnalyzeJob,
    ListAnalyses,
    GetProfile,
    UpdateProfile,
    GenerateResume,
    ListResumes,
    ListTemplates,
    DeleteResume,
    SaveCustomization,
    GetCustomization,
    ApplyCustomization,
    Analytics,
    Track,
}

impl Operation {
    pub fn base_delay(self) -> Duration {
        let ms = match self {
            Operation::Login | Operation::Register => 800,
            Operation::ValidateToken => 300,
            Operation::AnalyzeJob => 1500,
            Operation::ListAnalyses => 300,
            Operation::GetProfile => 400,
            Operation::UpdateProfile => 600,
            Operation::GenerateResume => 2000,
            Operation::ListResumes | Operation::DeleteResume => 300,
            Operation::ListTemplates | Operation::SaveCustomization => 200,
            Operation::GetCustomization | Operation::Track => 100,
            Operation::ApplyCustomization | Operation::Analytics => 300,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.max(0.0),
        }
    }

    /// No delay at all.
    #[cfg(test)]
    pub fn none() -> Self {
        Self { scale: 0.0 }
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        op.base_delay().mul_f64(self.scale)
    }

    pub async fn simulate(&self, op: Operation) {
        let delay = self.delay_for(op);
        if delay.is_zero() {
            return;
        }
        trace!("Simulating {:?} latency: {}ms", op, delay.as_millis());
        tokio::time::sleep(delay).await;
    }
}
