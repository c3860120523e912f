//! Categorical clinical codes: Sex, ChestPainType, FastingBloodSugar, RestingEcg,
//! ExerciseAngina, StSlope, MajorVessels, Thalassemia
//!
//! Each category travels as a string code in the form ("0", "1", ...) and as
//! an integer on the wire. The variant order is the order the form lists the
//! options in.

/// A clinical category with a fixed, finite set of integer codes.
pub trait CategoricalCode: Copy + Sized + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Integer code sent to the prediction service.
    fn code(self) -> u8;

    /// Human-readable option label.
    fn label(self) -> &'static str;

    /// Parse a form string code such as `"3"`.
    fn from_code(code: &str) -> Option<Self> {
        let code: u8 = code.trim().parse().ok()?;
        Self::ALL.iter().copied().find(|v| v.code() == code)
    }

    /// Accepted codes joined for error messages, e.g. `"3, 6, 7"`.
    fn accepted_codes() -> String {
        let mut codes: Vec<u8> = Self::ALL.iter().map(|v| v.code()).collect();
        codes.sort_unstable();
        codes
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

macro_rules! categorical_code {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl CategoricalCode for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(code: u8) -> Result<Self, u8> {
                Self::ALL.iter().copied().find(|v| v.code() == code).ok_or(code)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

categorical_code! {
    /// Biological sex as recorded in the source dataset
    Sex {
        Male = 1 => "Male",
        Female = 0 => "Female",
    }
}

categorical_code! {
    /// Chest pain presentation
    ChestPainType {
        TypicalAngina = 0 => "Typical Angina (0)",
        AtypicalAngina = 1 => "Atypical Angina (1)",
        NonAnginalPain = 2 => "Non-anginal Pain (2)",
        Asymptomatic = 3 => "Asymptomatic (3)",
    }
}

categorical_code! {
    /// Fasting blood sugar relative to 120 mg/dl
    FastingBloodSugar {
        Above120 = 1 => "Greater than 120 mg/dl",
        AtMost120 = 0 => "Less than or equal to 120 mg/dl",
    }
}

categorical_code! {
    /// Resting electrocardiogram result
    RestingEcg {
        Normal = 0 => "Normal (0)",
        StTWaveAbnormality = 1 => "ST-T Wave Abnormality (1)",
        LeftVentricularHypertrophy = 2 => "Left Ventricular Hypertrophy (2)",
    }
}

categorical_code! {
    /// Chest pain induced by exercise
    ExerciseAngina {
        Yes = 1 => "Yes",
        No = 0 => "No",
    }
}

categorical_code! {
    /// Slope of the peak exercise ST segment
    StSlope {
        Upsloping = 0 => "Upsloping (0)",
        Flat = 1 => "Flat (1)",
        Downsloping = 2 => "Downsloping (2)",
    }
}

categorical_code! {
    /// Number of major vessels colored by fluoroscopy
    MajorVessels {
        Zero = 0 => "0",
        One = 1 => "1",
        Two = 2 => "2",
        Three = 3 => "3",
    }
}

categorical_code! {
    /// Thallium stress test result
    Thalassemia {
        Normal = 3 => "Normal (3)",
        FixedDefect = 6 => "Fixed Defect (6)",
        ReversibleDefect = 7 => "Reversible Defect (7)",
    }
}
