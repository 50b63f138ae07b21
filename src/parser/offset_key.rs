//! Guess which symbol a PHPStan message is about.
//!
//! The JSON report carries no column information, only prose such as
//! `Call to an undefined method App\Foo::bar().`. For identifiers whose
//! message templates are known, the symbol is pulled back out of the prose
//! so the diagnostic can highlight it instead of the whole line.
//!
//! Each identifier owns an ordered list of rules; the first rule whose
//! pattern matches yields its capture group. Everything else yields `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

/// A pattern and the capture group holding the token
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    pub pattern: &'static str,
    pub group: usize,
}

macro_rules! rule {
    ($pattern:expr, $group:literal $(,)?) => {
        ExtractionRule {
            pattern: $pattern,
            group: $group,
        }
    };
}

// Optional namespace prefix, dropped so the short name can be found in the
// source line even when the class was imported with `use`.
macro_rules! short_name {
    ($prefix:literal, $suffix:literal) => {
        concat!($prefix, r"(?:[\w\\]*\\)?(\w+)", $suffix)
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identifier {
    OffsetAccessNotFound,
    IssetOffset,
    NullCoalesceOffset,
    PropertyUnused,
    PropertyOnlyWritten,
    PropertyOnlyRead,
    PropertyNotFound,
    PropertyNonObject,
    PropertyPrivate,
    PropertyProtected,
    AssignPropertyType,
    MethodNotFound,
    StaticMethodNotFound,
    MethodUnused,
    MethodNonObject,
    MethodPrivate,
    MethodProtected,
    ClassNotFound,
    FunctionNotFound,
    ConstantNotFound,
    ClassConstantNotFound,
    VariableUndefined,
    ArgumentType,
    ArgumentsCount,
    MissingTypeReturn,
    MissingTypeParameter,
    MissingTypeProperty,
    MissingTypeIterableValue,
}

impl Identifier {
    pub const ALL: &'static [Identifier] = &[
        Identifier::OffsetAccessNotFound,
        Identifier::IssetOffset,
        Identifier::NullCoalesceOffset,
        Identifier::PropertyUnused,
        Identifier::PropertyOnlyWritten,
        Identifier::PropertyOnlyRead,
        Identifier::PropertyNotFound,
        Identifier::PropertyNonObject,
        Identifier::PropertyPrivate,
        Identifier::PropertyProtected,
        Identifier::AssignPropertyType,
        Identifier::MethodNotFound,
        Identifier::StaticMethodNotFound,
        Identifier::MethodUnused,
        Identifier::MethodNonObject,
        Identifier::MethodPrivate,
        Identifier::MethodProtected,
        Identifier::ClassNotFound,
        Identifier::FunctionNotFound,
        Identifier::ConstantNotFound,
        Identifier::ClassConstantNotFound,
        Identifier::VariableUndefined,
        Identifier::ArgumentType,
        Identifier::ArgumentsCount,
        Identifier::MissingTypeReturn,
        Identifier::MissingTypeParameter,
        Identifier::MissingTypeProperty,
        Identifier::MissingTypeIterableValue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Identifier::OffsetAccessNotFound => "offsetAccess.notFound",
            Identifier::IssetOffset => "isset.offset",
            Identifier::NullCoalesceOffset => "nullCoalesce.offset",
            Identifier::PropertyUnused => "property.unused",
            Identifier::PropertyOnlyWritten => "property.onlyWritten",
            Identifier::PropertyOnlyRead => "property.onlyRead",
            Identifier::PropertyNotFound => "property.notFound",
            Identifier::PropertyNonObject => "property.nonObject",
            Identifier::PropertyPrivate => "property.private",
            Identifier::PropertyProtected => "property.protected",
            Identifier::AssignPropertyType => "assign.propertyType",
            Identifier::MethodNotFound => "method.notFound",
            Identifier::StaticMethodNotFound => "staticMethod.notFound",
            Identifier::MethodUnused => "method.unused",
            Identifier::MethodNonObject => "method.nonObject",
            Identifier::MethodPrivate => "method.private",
            Identifier::MethodProtected => "method.protected",
            Identifier::ClassNotFound => "class.notFound",
            Identifier::FunctionNotFound => "function.notFound",
            Identifier::ConstantNotFound => "constant.notFound",
            Identifier::ClassConstantNotFound => "classConstant.notFound",
            Identifier::VariableUndefined => "variable.undefined",
            Identifier::ArgumentType => "argument.type",
            Identifier::ArgumentsCount => "arguments.count",
            Identifier::MissingTypeReturn => "missingType.return",
            Identifier::MissingTypeParameter => "missingType.parameter",
            Identifier::MissingTypeProperty => "missingType.property",
            Identifier::MissingTypeIterableValue => "missingType.iterableValue",
        }
    }

    /// Rules in priority order
    pub fn rules(&self) -> &'static [ExtractionRule] {
        match self {
            Identifier::OffsetAccessNotFound => &[rule!(
                r#"Offset ('[^']*'|"[^"]*"|\d+) (?:does not|might not) exist"#,
                1,
            )],
            Identifier::IssetOffset => &[rule!(r"Offset ('[^']*'|\d+) on .* in isset\(\)", 1)],
            Identifier::NullCoalesceOffset => {
                &[rule!(r"Offset ('[^']*'|\d+) on .* on left side of \?\?", 1)]
            }
            Identifier::PropertyUnused => &[rule!(r"::(\$\w+) is unused", 1)],
            Identifier::PropertyOnlyWritten => &[rule!(r"::(\$\w+) is never read, only written", 1)],
            Identifier::PropertyOnlyRead => &[rule!(r"::(\$\w+) is never written, only read", 1)],
            Identifier::PropertyNotFound => {
                &[rule!(r"undefined (?:static )?property ([\w\\]+)::\$(\w+)", 2)]
            }
            Identifier::PropertyNonObject => &[rule!(r"Cannot access property \$(\w+) on", 1)],
            Identifier::PropertyPrivate => {
                &[rule!(r"Access to private (?:static )?property (?:[\w\\]+::)?\$(\w+)", 1)]
            }
            Identifier::PropertyProtected => {
                &[rule!(r"Access to protected (?:static )?property (?:[\w\\]+::)?\$(\w+)", 1)]
            }
            Identifier::AssignPropertyType => {
                &[rule!(r"Property [\w\\]+::\$(\w+) \([^)]*\) does not accept", 1)]
            }
            Identifier::MethodNotFound => {
                &[rule!(r"Call to an undefined method ([\w\\]+)::(\w+)\(\)", 2)]
            }
            Identifier::StaticMethodNotFound => {
                &[rule!(r"Call to an undefined static method ([\w\\]+)::(\w+)\(\)", 2)]
            }
            Identifier::MethodUnused => &[rule!(r"Method ([\w\\]+)::(\w+)\(\) is unused", 2)],
            Identifier::MethodNonObject => &[rule!(r"Cannot call method (\w+)\(\) on", 1)],
            Identifier::MethodPrivate => {
                &[rule!(r"Call to private (?:static )?method (\w+)\(\)", 1)]
            }
            Identifier::MethodProtected => {
                &[rule!(r"Call to protected (?:static )?method (\w+)\(\)", 1)]
            }
            Identifier::ClassNotFound => &[
                rule!(short_name!("Instantiated class ", " not found"), 1),
                rule!(short_name!("on an unknown class ", r"\b"), 1),
                rule!(short_name!("(?:Class|Interface|Trait) ", " not found"), 1),
                rule!(short_name!("has invalid (?:return )?type ", r"\b"), 1),
            ],
            Identifier::FunctionNotFound => &[rule!(short_name!("Function ", " not found"), 1)],
            Identifier::ConstantNotFound => &[rule!(short_name!("Constant ", " not found"), 1)],
            Identifier::ClassConstantNotFound => {
                &[rule!(r"Access to undefined constant ([\w\\]+)::(\w+)", 2)]
            }
            Identifier::VariableUndefined => &[
                rule!(r"Undefined variable: (\$\w+)", 1),
                rule!(r"Variable (\$\w+) might not be defined", 1),
            ],
            Identifier::ArgumentType => &[
                rule!(r"of method [\w\\]+::(\w+)\(\) expects", 1),
                rule!(short_name!("of function ", " expects"), 1),
            ],
            Identifier::ArgumentsCount => &[
                rule!(r"Method [\w\\]+::(\w+)\(\) invoked with", 1),
                rule!(short_name!("Function ", " invoked with"), 1),
                rule!(short_name!("Class ", " constructor invoked with"), 1),
            ],
            Identifier::MissingTypeReturn => &[
                rule!(r"Method [\w\\]+::(\w+)\(\) has no return type", 1),
                rule!(short_name!("Function ", r"\(\) has no return type"), 1),
            ],
            Identifier::MissingTypeParameter => {
                &[rule!(r"has parameter (\$\w+) with no type specified", 1)]
            }
            Identifier::MissingTypeProperty => {
                &[rule!(r"Property [\w\\]+::(\$\w+) has no type specified", 1)]
            }
            Identifier::MissingTypeIterableValue => &[
                rule!(r"has parameter (\$\w+) with no value type specified", 1),
                rule!(r"Property [\w\\]+::(\$\w+) type has no value type specified", 1),
                rule!(r"Method [\w\\]+::(\w+)\(\) return type has no value type", 1),
                rule!(short_name!("Function ", r"\(\) return type has no value type"), 1),
            ],
        }
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Identifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("Unknown identifier: {}", s))
    }
}

struct CompiledRule {
    regex: Regex,
    group: usize,
}

static COMPILED: Lazy<HashMap<Identifier, Vec<CompiledRule>>> = Lazy::new(|| {
    Identifier::ALL
        .iter()
        .map(|id| {
            let rules = id
                .rules()
                .iter()
                .filter_map(|r| match Regex::new(r.pattern) {
                    Ok(regex) => Some(CompiledRule {
                        regex,
                        group: r.group,
                    }),
                    Err(e) => {
                        warn!("Skipping bad pattern for {}: {}", id, e);
                        None
                    }
                })
                .collect();
            (*id, rules)
        })
        .collect()
});

/// Extract the token a message refers to, if its identifier is known
pub fn extract_token(identifier: &str, message: &str) -> Option<String> {
    let id: Identifier = identifier.parse().ok()?;
    COMPILED.get(&id)?.iter().find_map(|rule| {
        rule.regex
            .captures(message)
            .and_then(|caps| caps.get(rule.group))
            .map(|m| m.as_str().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One real-world message per identifier, with the token expected from it
    const SAMPLES: &[(&str, &str, &str)] = &[
        ("offsetAccess.notFound", "Offset 'name' does not exist on array{id: int}.", "'name'"),
        ("isset.offset", "Offset 'id' on array{id: int} in isset() always exists and is not nullable.", "'id'"),
        ("nullCoalesce.offset", "Offset 0 on array{int} on left side of ?? always exists and is not nullable.", "0"),
        ("property.unused", "Property App\\User::$cache is unused.", "$cache"),
        ("property.onlyWritten", "Property App\\User::$cache is never read, only written.", "$cache"),
        ("property.onlyRead", "Property App\\User::$cache is never written, only read.", "$cache"),
        ("property.notFound", "Access to an undefined property App\\User::$email.", "email"),
        ("property.nonObject", "Cannot access property $name on string.", "name"),
        ("property.private", "Access to private property App\\User::$secret.", "secret"),
        ("property.protected", "Access to protected property $token of class App\\User.", "token"),
        ("assign.propertyType", "Property App\\User::$age (int) does not accept string.", "age"),
        ("method.notFound", "Call to an undefined method App\\User::save().", "save"),
        ("staticMethod.notFound", "Call to an undefined static method App\\User::find().", "find"),
        ("method.unused", "Method App\\User::helper() is unused.", "helper"),
        ("method.nonObject", "Cannot call method format() on string|null.", "format"),
        ("method.private", "Call to private method hash() of class App\\User.", "hash"),
        ("method.protected", "Call to protected static method boot() of class App\\Model.", "boot"),
        ("class.notFound", "Instantiated class App\\Models\\Post not found.", "Post"),
        ("function.notFound", "Function App\\helper not found.", "helper"),
        ("constant.notFound", "Constant APP_DEBUG not found.", "APP_DEBUG"),
        ("classConstant.notFound", "Access to undefined constant App\\User::ROLE_ADMIN.", "ROLE_ADMIN"),
        ("variable.undefined", "Undefined variable: $x", "$x"),
        ("argument.type", "Parameter #1 $id of method App\\Repo::find() expects int, string given.", "find"),
        ("arguments.count", "Method App\\Repo::find() invoked with 2 parameters, 1 required.", "find"),
        ("missingType.return", "Method App\\Repo::all() has no return type specified.", "all"),
        ("missingType.parameter", "Method App\\Repo::find() has parameter $id with no type specified.", "$id"),
        ("missingType.property", "Property App\\Repo::$items has no type specified.", "$items"),
        ("missingType.iterableValue", "Property App\\Repo::$items type has no value type specified in iterable type array.", "$items"),
    ];

    #[test]
    fn test_every_identifier_has_working_sample() {
        for id in Identifier::ALL {
            let (_, message, expected) = SAMPLES
                .iter()
                .find(|(name, _, _)| *name == id.as_str())
                .unwrap_or_else(|| panic!("no sample for {}", id));
            assert_eq!(
                extract_token(id.as_str(), message).as_deref(),
                Some(*expected),
                "identifier {}",
                id
            );
        }
    }

    #[test]
    fn test_all_patterns_compile() {
        for id in Identifier::ALL {
            assert_eq!(COMPILED[id].len(), id.rules().len(), "identifier {}", id);
        }
    }

    #[test]
    fn test_identifier_round_trips_through_str() {
        for id in Identifier::ALL {
            assert_eq!(id.as_str().parse::<Identifier>(), Ok(*id));
        }
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(extract_token("return.type", "Method foo() should return int."), None);
        assert_eq!(extract_token("", "Undefined variable: $x"), None);
    }

    #[test]
    fn test_no_pattern_matches() {
        assert_eq!(extract_token("variable.undefined", "Something unrelated."), None);
    }

    #[test]
    fn test_later_rule_used_when_earlier_misses() {
        assert_eq!(
            extract_token("variable.undefined", "Variable $row might not be defined.").as_deref(),
            Some("$row")
        );
        assert_eq!(
            extract_token("class.notFound", "Call to static method make() on an unknown class Factory.")
                .as_deref(),
            Some("Factory")
        );
        assert_eq!(
            extract_token("class.notFound", "Class App\\Contracts\\Cache not found.").as_deref(),
            Some("Cache")
        );
        assert_eq!(
            extract_token(
                "missingType.iterableValue",
                "Method App\\Repo::all() return type has no value type specified in iterable type array."
            )
            .as_deref(),
            Some("all")
        );
    }

    #[test]
    fn test_parameter_variant_of_iterable_value() {
        assert_eq!(
            extract_token(
                "missingType.iterableValue",
                "Method App\\Repo::save() has parameter $rows with no value type specified in iterable type array."
            )
            .as_deref(),
            Some("$rows")
        );
    }

    #[test]
    fn test_designated_group_of_qualified_reference() {
        assert_eq!(
            extract_token("method.notFound", "Call to an undefined method Foo::bar().").as_deref(),
            Some("bar")
        );
    }
}
