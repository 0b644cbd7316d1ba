#![forbid(unsafe_code)]

//! Content-component registry and the URL-bound field probe.
//!
//! A content component may declare zero or more fields that mirror into
//! the page's query string. The manager never inspects a component's
//! internals; it asks a [`UrlFieldProbe`] for the declared set by
//! component name. [`ComponentRegistry`] is the stock probe: it maps
//! names to factories and instantiates the component to read its
//! declaration.

use core::fmt;

use ahash::AHashMap;

use crate::error::ProbeError;

/// Capability every modal content component exposes to the manager.
pub trait ContentComponent {
    /// Names of the fields this component reflects into the URL.
    fn url_bound_fields(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Looks up the URL-bound fields of a component by name.
pub trait UrlFieldProbe {
    /// Declared URL-bound fields of `component`.
    fn url_fields(&self, component: &str) -> Result<Vec<String>, ProbeError>;
}

impl<F> UrlFieldProbe for F
where
    F: Fn(&str) -> Result<Vec<String>, ProbeError>,
{
    fn url_fields(&self, component: &str) -> Result<Vec<String>, ProbeError> {
        self(component)
    }
}

/// A bare field declaration registered without a component type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredFields(pub Vec<String>);

impl ContentComponent for DeclaredFields {
    fn url_bound_fields(&self) -> Vec<String> {
        self.0.clone()
    }
}

type Factory = Box<dyn Fn() -> Result<Box<dyn ContentComponent>, ProbeError> + Send + Sync>;

/// Name-to-factory map of content components.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: AHashMap<String, Factory>,
}

impl fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ComponentRegistry")
            .field("components", &names)
            .finish()
    }
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory under `name`, replacing any previous one.
    pub fn register<C, F>(&mut self, name: impl Into<String>, factory: F)
    where
        C: ContentComponent + 'static,
        F: Fn() -> Result<C, ProbeError> + Send + Sync + 'static,
    {
        self.factories.insert(
            name.into(),
            Box::new(move || factory().map(|c| Box::new(c) as Box<dyn ContentComponent>)),
        );
    }

    /// Register a component type built with `Default`.
    pub fn register_default<C>(&mut self, name: impl Into<String>)
    where
        C: ContentComponent + Default + 'static,
    {
        self.register(name, || Ok(C::default()));
    }

    /// Register a plain list of URL-bound field names.
    pub fn register_fields<I, S>(&mut self, name: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let declared = DeclaredFields(fields.into_iter().map(Into::into).collect());
        self.register(name, move || Ok(declared.clone()));
    }

    /// Instantiate the component registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<Box<dyn ContentComponent>, ProbeError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ProbeError::UnknownComponent(name.to_owned()))?;
        factory()
    }

    /// Whether a component is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl UrlFieldProbe for ComponentRegistry {
    fn url_fields(&self, component: &str) -> Result<Vec<String>, ProbeError> {
        Ok(self.resolve(component)?.url_bound_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct InvoiceDetail;

    impl ContentComponent for InvoiceDetail {
        fn url_bound_fields(&self) -> Vec<String> {
            vec!["invoiceId".into(), "currentTab".into()]
        }
    }

    #[test]
    fn unknown_component_is_an_error() {
        let registry = ComponentRegistry::new();
        assert_eq!(
            registry.url_fields("missing").unwrap_err(),
            ProbeError::UnknownComponent("missing".into())
        );
    }

    #[test]
    fn default_component_reports_declared_fields() {
        let mut registry = ComponentRegistry::new();
        registry.register_default::<InvoiceDetail>("invoice-detail");

        assert!(registry.contains("invoice-detail"));
        assert_eq!(
            registry.url_fields("invoice-detail").unwrap(),
            ["invoiceId", "currentTab"]
        );
    }

    #[test]
    fn field_list_registration() {
        let mut registry = ComponentRegistry::new();
        registry.register_fields("customer-detail", ["customerId"]);
        assert_eq!(registry.url_fields("customer-detail").unwrap(), ["customerId"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn failing_factory_propagates_error() {
        let mut registry = ComponentRegistry::new();
        registry.register("broken", || -> Result<InvoiceDetail, ProbeError> {
            Err(ProbeError::Misconfigured {
                component: "broken".into(),
                reason: "no layout".into(),
            })
        });
        assert!(matches!(
            registry.url_fields("broken"),
            Err(ProbeError::Misconfigured { .. })
        ));
    }

    #[test]
    fn components_without_declaration_have_no_fields() {
        struct Plain;
        impl ContentComponent for Plain {}

        let mut registry = ComponentRegistry::new();
        registry.register("plain", || Ok(Plain));
        assert!(registry.url_fields("plain").unwrap().is_empty());
    }

    #[test]
    fn debug_lists_sorted_names() {
        let mut registry = ComponentRegistry::new();
        registry.register_fields("b", Vec::<String>::new());
        registry.register_fields("a", Vec::<String>::new());
        assert_eq!(
            format!("{registry:?}"),
            r#"ComponentRegistry { components: ["a", "b"] }"#
        );
    }
}
