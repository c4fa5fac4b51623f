//! Switches that tune how lenient reading is and how verbose writing is.

/// Options consulted while reading JSON into messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Fail on an object property that names no field. When off, the property
    /// is skipped.
    pub fail_on_unknown_properties: bool,
    /// Fail on `null` for a numeric or boolean field. When off, the field stays
    /// unset.
    pub fail_on_null_for_primitives: bool,
    /// Accept a bare value where a repeated field expects an array.
    pub accept_single_value_as_array: bool,
    /// Read `""` as "no value" for enum fields.
    pub accept_empty_string_as_null_enum: bool,
    /// Read an undeclared enum name or number as "no value" instead of failing.
    pub read_unknown_enum_values_as_null: bool,
    /// Reject JSON numbers for enum fields.
    pub fail_on_numbers_for_enums: bool,
}

impl ReadOptions {
    /// Strict defaults: unknown properties fail, everything else is off.
    pub const fn new() -> Self {
        Self {
            fail_on_unknown_properties: true,
            fail_on_null_for_primitives: false,
            accept_single_value_as_array: false,
            accept_empty_string_as_null_enum: false,
            read_unknown_enum_values_as_null: false,
            fail_on_numbers_for_enums: false,
        }
    }

    /// Skips unknown properties and reads unknown enum values as absent.
    pub const fn lenient() -> Self {
        Self {
            fail_on_unknown_properties: false,
            read_unknown_enum_values_as_null: true,
            ..Self::new()
        }
    }

    pub const fn with_fail_on_unknown_properties(mut self, on: bool) -> Self {
        self.fail_on_unknown_properties = on;
        self
    }

    pub const fn with_fail_on_null_for_primitives(mut self, on: bool) -> Self {
        self.fail_on_null_for_primitives = on;
        self
    }

    pub const fn with_accept_single_value_as_array(mut self, on: bool) -> Self {
        self.accept_single_value_as_array = on;
        self
    }

    pub const fn with_accept_empty_string_as_null_enum(mut self, on: bool) -> Self {
        self.accept_empty_string_as_null_enum = on;
        self
    }

    pub const fn with_read_unknown_enum_values_as_null(mut self, on: bool) -> Self {
        self.read_unknown_enum_values_as_null = on;
        self
    }

    pub const fn with_fail_on_numbers_for_enums(mut self, on: bool) -> Self {
        self.fail_on_numbers_for_enums = on;
        self
    }

    /// Whether an enum name that matches no declared value may be read as absent.
    pub(crate) fn ignores_enum_name(&self, name: &str) -> bool {
        self.read_unknown_enum_values_as_null
            || (self.accept_empty_string_as_null_enum && name.is_empty())
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Options consulted while writing messages as JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Also write fields without presence that hold their default value.
    pub include_default_values: bool,
    /// Key objects by the field names from the `.proto` file instead of their
    /// lowerCamelCase JSON names.
    pub preserve_proto_field_names: bool,
    /// Write enum values as numbers instead of names.
    pub enums_as_ints: bool,
    /// Write 64-bit integers as JSON strings.
    pub int64_as_string: bool,
}

impl WriteOptions {
    pub const fn new() -> Self {
        Self {
            include_default_values: false,
            preserve_proto_field_names: false,
            enums_as_ints: false,
            int64_as_string: false,
        }
    }

    pub const fn with_include_default_values(mut self, on: bool) -> Self {
        self.include_default_values = on;
        self
    }

    pub const fn with_preserve_proto_field_names(mut self, on: bool) -> Self {
        self.preserve_proto_field_names = on;
        self
    }

    pub const fn with_enums_as_ints(mut self, on: bool) -> Self {
        self.enums_as_ints = on;
        self
    }

    pub const fn with_int64_as_string(mut self, on: bool) -> Self {
        self.int64_as_string = on;
        self
    }
}
