use std::fmt::{Debug, Display};
use std::iter::Sum;

/// T values are real-valued attention scores that can be shared between rayon workers
pub trait Score: ::num::Float + Debug + Display + Default + Sum + Send + Sync {}

impl<T: ::num::Float + Debug + Display + Default + Sum + Send + Sync> Score for T {}
