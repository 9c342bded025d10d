#[macro_export]
macro_rules! plain {
    // Handle null
    (null) => {
        $crate::Plain::Null
    };

    // Handle true
    (true) => {
        $crate::Plain::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Plain::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Plain::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Plain::Array(vec![$($crate::plain!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Plain::Object($crate::PlainMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::PlainMap::new();
        $(
            object.insert($key.to_string(), $crate::plain!($value));
        )*
        $crate::Plain::Object(object)
    }};

    // Fallback for any expression with a From conversion
    ($other:expr) => {
        $crate::Plain::from($other)
    };
}

#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle the undefined marker
    (undefined) => {
        $crate::Value::Undefined
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty array
    ([]) => {
        $crate::Value::array(Vec::new())
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::array(vec![$($crate::value!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::Value::from($crate::ValueMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ValueMap::new();
        $(
            object.insert($key.to_string(), $crate::value!($value));
        )*
        $crate::Value::from(object)
    }};

    // Fallback for any expression with a From conversion
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
