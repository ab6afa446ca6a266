use crate::runner::ds::value::ValueType;

/// One entry of the name listing a resolver offers for a base.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDescriptor {
    pub name: String,
    pub display_name: String,
    pub short_description: String,
    pub value_type: ValueType,
    pub preferred: bool,
    pub resolvable_at_design_time: bool,
}

impl FeatureDescriptor {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        let name = name.into();
        FeatureDescriptor {
            display_name: name.clone(),
            name,
            short_description: String::new(),
            value_type,
            preferred: true,
            resolvable_at_design_time: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.short_description = description.into();
        self
    }
}
