use schemars::gen::SchemaSettings;
use schemars::JsonSchema;

/// JSON schema for `T` in the form the structured-output API accepts.
///
/// Subschemas are inlined and the meta keys (`$schema`, `title`,
/// `definitions`) are dropped, every non-`Option` field stays required.
pub fn response_schema<T: JsonSchema>() -> serde_json::Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let root = settings.into_generator().into_root_schema_for::<T>();

    let mut value = serde_json::to_value(root).unwrap_or_default();
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
        object.remove("title");
        object.remove("definitions");
    }
    value
}
