//! Shared test assets: test objects, test factories and a baseline config
#![allow(dead_code)]

use std::sync::Arc;

use service_manager::{
    Factory, Options, OverrideMode, Service, ServiceLocator, ServiceManager, ServiceManagerConfig,
    ServiceResult, TypeRegistry,
};

pub const TEST_OBJECT_ONE: &str = "TestObjectOne";
pub const TEST_OBJECT_TWO: &str = "TestObjectTwo";
pub const TEST_FACTORY_ONE: &str = "TestFactoryOne";
pub const TEST_FACTORY_TWO: &str = "TestFactoryTwo";

#[derive(Debug, Clone, PartialEq)]
pub struct TestObjectOne {
    pub options: Option<Options>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TestObjectTwo {
    pub options: Option<Options>,
}

pub fn option(key: &str, value: &str) -> Options {
    let mut options = Options::new();
    options.insert(key.to_string(), value.into());
    options
}

pub struct TestFactoryOne;

impl Factory for TestFactoryOne {
    fn create(
        &self,
        _context: &dyn ServiceLocator,
        _requested_name: &str,
        _options: Option<&Options>,
    ) -> ServiceResult<Service> {
        Ok(Arc::new(TestObjectOne {
            options: Some(option("test_option", "option_value_added_by_test_factory_one")),
        }))
    }

    fn factory_name(&self) -> &'static str {
        TEST_FACTORY_ONE
    }
}

pub struct TestFactoryTwo;

impl Factory for TestFactoryTwo {
    fn create(
        &self,
        _context: &dyn ServiceLocator,
        _requested_name: &str,
        _options: Option<&Options>,
    ) -> ServiceResult<Service> {
        Ok(Arc::new(TestObjectOne {
            options: Some(option("test_option", "option_value_added_by_test_factory_two")),
        }))
    }

    fn factory_name(&self) -> &'static str {
        TEST_FACTORY_TWO
    }
}

pub fn test_types() -> Arc<TypeRegistry> {
    let mut types = TypeRegistry::new();
    types
        .register_service(TEST_OBJECT_ONE, |options| {
            Ok(TestObjectOne {
                options: options.cloned(),
            })
        })
        .register_service(TEST_OBJECT_TWO, |options| {
            Ok(TestObjectTwo {
                options: options.cloned(),
            })
        })
        .register_factory(TEST_FACTORY_ONE, || TestFactoryOne)
        .register_factory(TEST_FACTORY_TWO, || TestFactoryTwo);
    Arc::new(types)
}

/// Two aliases, two factories, `TestObjectTwo` not shared
pub fn test_config() -> ServiceManagerConfig {
    ServiceManagerConfig::new()
        .with_alias("test_alias_to_object", TEST_OBJECT_ONE)
        .with_alias("test_alias_to_factory", "test_factory")
        .with_factory(TEST_OBJECT_ONE, TEST_FACTORY_ONE)
        .with_factory("test_factory", TEST_FACTORY_TWO)
        .with_shared(TEST_OBJECT_TWO, false)
        .with_shared_by_default(true)
}

pub fn manager_with(config: ServiceManagerConfig, mode: OverrideMode) -> ServiceManager {
    ServiceManager::builder()
        .types(test_types())
        .config(config)
        .override_mode(mode)
        .build()
}

pub fn test_manager(mode: OverrideMode) -> ServiceManager {
    manager_with(test_config(), mode)
}

pub fn names(list: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = list.iter().map(|s| s.to_string()).collect();
    names.sort();
    names
}
