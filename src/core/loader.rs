use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::{TryFrom, TryInto},
};

pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    String(String),
    Array(Vec<InputParamsValue>),
}

impl InputParamsValue {
    fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Integers are accepted where floats are expected, `16` reads as `16.0`.
    fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f32),
            _ => None,
        }
    }
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $conv:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let Some(value) = value.$conv() {
                            self.visited_names.insert(key.to_owned());
                            return Ok(value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> $type {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $type:ty, $len:expr, $conv:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[$type; $len]> {
                    if let Some(value) = self.params.get(key) {
                        let error_info = format!(
                            "{} - '{}' should be array with {} {}s",
                            self.name,
                            key,
                            $len,
                            $hint,
                        );
                        if let InputParamsValue::Array(arr) = value {
                            if arr.len() == $len {
                                let mut result: [$type; $len] = Default::default();
                                for (slot, ele) in result.iter_mut().zip(arr) {
                                    match ele.$conv() {
                                        Some(ele) => *slot = ele,
                                        None => anyhow::bail!(error_info),
                                    }
                                }
                                self.visited_names.insert(key.to_owned());
                                return Ok(result);
                            }
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [$type; $len],
                ) -> [$type; $len] {
                    if let Ok(value) = self.[<get_ $name>](key) {
                        value
                    } else {
                        fallback
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, as_int, "integer"),
        (float, f32, as_float, "float"),
    }

    params_get_vec! {
        (float3, f32, 3, as_float, "float"),
    }

    /// Non-negative integer, used for slot and material indices.
    pub fn get_index(&mut self, key: &str) -> anyhow::Result<usize> {
        let value = self.get_int(key)?;
        if value < 0 {
            anyhow::bail!(format!(
                "{} - '{}' should be a non-negative integer",
                self.name, key
            ));
        }
        Ok(value as usize)
    }

    pub fn get_index_or(&mut self, key: &str, fallback: usize) -> anyhow::Result<usize> {
        if self.contains_key(key) {
            self.get_index(key)
        } else {
            Ok(fallback)
        }
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be a string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(_) => {
                anyhow::bail!("can't convert to InputParamsValue from bool json")
            }
            serde_json::Value::Number(v) => {
                // integers outside i32 are kept as floats so index reads reject them
                if let Some(v) = v.as_i64().and_then(|v| i32::try_from(v).ok()) {
                    Ok(Self::Int(v))
                } else if let Some(v) = v.as_f64() {
                    Ok(Self::Float(v as f32))
                } else {
                    anyhow::bail!(format!("can't convert number '{}'", v))
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match v.try_into() {
                        Ok(v) => values.push(v),
                        Err(e) => anyhow::bail!(format!("can't convert array element: {}", e)),
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match v.try_into() {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => anyhow::bail!(format!("can't convert member '{}': {}", k, e)),
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}
