use crate::errors::ServiceError;
use serde::de::DeserializeOwned;

/// Wraps a request body that still has to be checked before it can be used.
///
/// Handlers extract `Json<Validator<T>>` and call [`Validator::validate`] to
/// get hold of the inner value.
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct Validator<T>(T);

pub trait Validate<T> {
    fn validate(&self) -> Result<(), ServiceError>;
}

impl<T> Validator<T> {
    #[allow(dead_code)]
    pub fn new(i: T) -> Validator<T> {
        Validator::<T>(i)
    }
}

impl<T> Validator<T>
where
    T: Validate<T>,
    T: DeserializeOwned,
{
    pub fn validate(self) -> Result<T, ServiceError> {
        self.0.validate()?;
        Ok(self.0)
    }
}
