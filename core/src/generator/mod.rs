use crate::*;
pub use random::*;

mod random;

pub trait ChallengeGenerator {
    fn generate(&mut self, config: &ChallengeConfig) -> Result<Challenge>;
}
