//! The service locator capability
//!
//! [`ServiceLocator`] is the minimal surface a factory sees while it builds a
//! service. [`ServiceManager`](crate::ServiceManager) implements it, and a
//! manager may hand a different locator (a shared root) to its factories.

use std::any::Any;
use std::sync::Arc;

use crate::error::{ServiceError, ServiceResult};

/// A type-erased service instance
pub type Service = Arc<dyn Any + Send + Sync>;

/// Construction options forwarded to factories
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Anything that can build, look up and store services by name.
pub trait ServiceLocator: Send + Sync {
    /// Build a fresh service, never touching the instance cache.
    fn build(&self, name: &str, options: Option<&Options>) -> ServiceResult<Service>;

    /// Find a cached service or create (and possibly cache) it.
    fn get(&self, name: &str) -> ServiceResult<Service>;

    /// Store an instance under `name`.
    fn set(&self, name: &str, service: Service) -> ServiceResult<()>;

    /// Whether an instance is cached under exactly `name`.
    fn has(&self, name: &str) -> bool;
}

/// Typed accessors layered over any [`ServiceLocator`]
pub trait ServiceLocatorExt: ServiceLocator {
    /// Like [`ServiceLocator::get`], downcasting to `T`.
    fn get_as<T>(&self, name: &str) -> ServiceResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast_service(name, self.get(name)?)
    }

    /// Like [`ServiceLocator::build`], downcasting to `T`.
    fn build_as<T>(&self, name: &str, options: Option<&Options>) -> ServiceResult<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        downcast_service(name, self.build(name, options)?)
    }
}

impl<L: ServiceLocator + ?Sized> ServiceLocatorExt for L {}

/// Downcast a type-erased service, reporting the requested name on mismatch.
pub fn downcast_service<T>(name: &str, service: Service) -> ServiceResult<Arc<T>>
where
    T: Any + Send + Sync,
{
    service.downcast::<T>().map_err(|_| ServiceError::TypeMismatch {
        name: name.to_string(),
        expected: std::any::type_name::<T>(),
    })
}

/// Whether a type-erased service holds a `T`.
pub fn service_is<T: Any>(service: &Service) -> bool {
    service.is::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Mailer;

    #[test]
    fn test_downcast_service() {
        let service: Service = Arc::new(Mailer);
        assert!(service_is::<Mailer>(&service));
        assert!(downcast_service::<Mailer>("mailer", service).is_ok());
    }

    #[test]
    fn test_downcast_mismatch_reports_name() {
        let service: Service = Arc::new(42u32);
        let err = downcast_service::<Mailer>("mailer", service).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::TypeMismatch { ref name, .. } if name == "mailer"
        ));
    }
}
