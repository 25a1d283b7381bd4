/// Parsed IR method descriptor
///
/// Descriptors look like `<java.util.HashMap: java.lang.Object put(java.lang.Object,java.lang.Object)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub class_name: String,
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<String>,
}

impl MethodDescriptor {
    /// Parse a descriptor, returning `None` when it is not in the `<Class: ret name(args)>` shape
    pub fn parse(descriptor: &str) -> Option<Self> {
        let inner = descriptor.trim().strip_prefix('<')?.strip_suffix('>')?;
        let (class_name, rest) = inner.split_once(':')?;
        let rest = rest.trim();

        let (return_type, call) = rest.split_once(' ')?;
        let open = call.find('(')?;
        let close = call.rfind(')')?;
        if close < open {
            return None;
        }

        let name = call[..open].trim();
        if name.is_empty() || class_name.trim().is_empty() {
            return None;
        }

        let parameters = call[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        Some(Self {
            class_name: class_name.trim().to_string(),
            return_type: return_type.trim().to_string(),
            name: name.to_string(),
            parameters,
        })
    }

    /// Declaring class of a descriptor, without parsing the rest
    pub fn class_of(descriptor: &str) -> Option<&str> {
        let inner = descriptor.trim().strip_prefix('<')?;
        let (class_name, _) = inner.split_once(':')?;
        let class_name = class_name.trim();
        (!class_name.is_empty()).then_some(class_name)
    }
}
