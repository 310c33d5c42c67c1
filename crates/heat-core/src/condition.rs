//! Initial-condition expressions.
//!
//! A condition is written `name(arg, arg, ...)` with numeric arguments, or
//! `file(path)` naming a curve file, and parsed once into a [`ConditionExpression`], a closed set of tagged
//! variants each carrying its own parameters. Evaluation is pure: the value
//! at a grid point depends only on the point's index and the grid.
//!
//! The parser dispatches through a name → (arguments, constructor) table,
//! which is also what [`ConditionExpression::forms`] lists for help output.

use std::f64::consts::PI;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use crate::error::{HeatError, ParseError, ParseErrorKind};
use crate::field::{GridField, GridSpec};

/// One impulse of a `spikes(...)` condition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spike {
    /// Value placed at the spike's grid point.
    pub amplitude: f64,
    /// Grid index of the spike.
    pub index: usize,
}

/// A parsed initial condition `u(x, 0)`.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionExpression {
    /// `const(v)`: the same value everywhere.
    Const {
        /// The constant temperature.
        value: f64,
    },
    /// `spikes(base, amp, idx, ...)`: `base` everywhere except the listed
    /// grid indices, which take their spike's amplitude. Later spikes win
    /// when two share an index.
    Spikes {
        /// Background value.
        base: f64,
        /// Impulses in the order they were written.
        spikes: SmallVec<[Spike; 2]>,
    },
    /// `sin(A, w)`: `A * sin(pi * w * x)`.
    Sin {
        /// Amplitude `A`.
        amplitude: f64,
        /// Frequency multiplier `w`.
        frequency: f64,
    },
    /// `ramp(L, R)`: linear from `L` at the first point to `R` at the last.
    Ramp {
        /// Value at `x = 0`.
        left: f64,
        /// Value at `x = lenx`.
        right: f64,
    },
    /// `step(L, xmid, R)`: `L` for `x < xmid`, `R` otherwise.
    Step {
        /// Value left of the step.
        left: f64,
        /// Position of the step.
        xmid: f64,
        /// Value at and right of the step.
        right: f64,
    },
    /// `rand(seed, base, amp)`: `base + amp * u` with `u` uniform in
    /// `[-1, 1)`, reproducible for a given seed.
    Rand {
        /// Stream seed.
        seed: u64,
        /// Centre of the value range.
        base: f64,
        /// Half-width of the value range.
        amplitude: f64,
    },
    /// `file(path)`: the `y` column of a curve file, one value per grid
    /// point, read once at parse time.
    File {
        /// The curve file as written.
        path: PathBuf,
        /// Values in file order.
        values: Arc<[f64]>,
    },
}

#[derive(Clone, Copy)]
enum Arity {
    Exact(usize),
    /// `min`, `min + 2`, `min + 4`, ...
    Pairs(usize),
}

impl Arity {
    fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exact(k) => n == k,
            Self::Pairs(min) => n >= min && (n - min) % 2 == 0,
        }
    }
}

type Builder = fn(&[f64]) -> Result<ConditionExpression, ParseErrorKind>;

enum Args {
    Numbers {
        arity: Arity,
        expected: &'static str,
        build: Builder,
    },
    /// The whole argument text is one path.
    Path,
}

struct Form {
    name: &'static str,
    usage: &'static str,
    args: Args,
}

const FORMS: &[Form] = &[
    Form {
        name: "const",
        usage: "const(V): constant value V",
        args: Args::Numbers {
            arity: Arity::Exact(1),
            expected: "1",
            build: build_const,
        },
    },
    Form {
        name: "spikes",
        usage: "spikes(C,A0,I0,A1,I1,...): constant C with amplitude Ak at grid index Ik",
        args: Args::Numbers {
            arity: Arity::Pairs(3),
            expected: "3, 5, 7, ...",
            build: build_spikes,
        },
    },
    Form {
        name: "sin",
        usage: "sin(A,w): A*sin(pi*w*x)",
        args: Args::Numbers {
            arity: Arity::Exact(2),
            expected: "2",
            build: build_sin,
        },
    },
    Form {
        name: "ramp",
        usage: "ramp(L,R): linear ramp from L at x=0 to R at x=lenx",
        args: Args::Numbers {
            arity: Arity::Exact(2),
            expected: "2",
            build: build_ramp,
        },
    },
    Form {
        name: "step",
        usage: "step(L,Mx,R): L for x<Mx and R for x>=Mx",
        args: Args::Numbers {
            arity: Arity::Exact(3),
            expected: "3",
            build: build_step,
        },
    },
    Form {
        name: "rand",
        usage: "rand(S,B,A): uniform values in [B-A,B+A) from seed S",
        args: Args::Numbers {
            arity: Arity::Exact(3),
            expected: "3",
            build: build_rand,
        },
    },
    Form {
        name: "file",
        usage: "file(P): y column of curve file P, one value per grid point",
        args: Args::Path,
    },
];

fn build_const(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    Ok(ConditionExpression::Const { value: a[0] })
}

fn build_spikes(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    let mut spikes = SmallVec::new();
    for (k, pair) in a[1..].chunks_exact(2).enumerate() {
        spikes.push(Spike {
            amplitude: pair[0],
            index: as_index(2 + 2 * k, pair[1])?,
        });
    }
    Ok(ConditionExpression::Spikes { base: a[0], spikes })
}

fn build_sin(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    Ok(ConditionExpression::Sin {
        amplitude: a[0],
        frequency: a[1],
    })
}

fn build_ramp(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    Ok(ConditionExpression::Ramp {
        left: a[0],
        right: a[1],
    })
}

fn build_step(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    Ok(ConditionExpression::Step {
        left: a[0],
        xmid: a[1],
        right: a[2],
    })
}

fn build_rand(a: &[f64]) -> Result<ConditionExpression, ParseErrorKind> {
    Ok(ConditionExpression::Rand {
        seed: as_index(0, a[0])? as u64,
        base: a[1],
        amplitude: a[2],
    })
}

fn load_file(raw: &str) -> Result<ConditionExpression, ParseErrorKind> {
    let path = raw.trim();
    if path.is_empty() {
        return Err(ParseErrorKind::WrongArity {
            name: "file",
            expected: "1",
            found: 0,
        });
    }
    let curve =
        heat_curve::read_curve_file(Path::new(path)).map_err(|e| ParseErrorKind::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    Ok(ConditionExpression::File {
        path: PathBuf::from(path),
        values: curve.values().into(),
    })
}

/// A non-negative integral argument (grid index or seed).
fn as_index(position: usize, v: f64) -> Result<usize, ParseErrorKind> {
    if v < 0.0 || v.fract() != 0.0 || v > u32::MAX as f64 {
        return Err(ParseErrorKind::InvalidArgument {
            position,
            reason: "expected a non-negative integer",
        });
    }
    Ok(v as usize)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn parse_number(position: usize, raw: &str) -> Result<f64, ParseErrorKind> {
    let text = raw.trim();
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidNumber {
            position,
            text: text.to_string(),
        })
}

/// Uniform sample in `[-1, 1)` for grid point `index` of stream `seed`.
///
/// Each point owns two 32-bit words of the ChaCha8 stream, so the value is
/// independent of evaluation order.
fn uniform_at(seed: u64, index: usize) -> f64 {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_word_pos(2 * index as u128);
    let bits = rng.next_u64() >> 11;
    let unit = bits as f64 / (1u64 << 53) as f64;
    2.0 * unit - 1.0
}

impl ConditionExpression {
    /// Parse `name(arg, ...)`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the shape is not `identifier(args)`, the
    /// identifier is unknown, the argument count is wrong, an argument is
    /// not a finite number, or a `file(path)` curve cannot be read.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let fail = |kind| ParseError::new(input, kind);
        let text = input.trim();

        let open = text.find('(').ok_or_else(|| {
            fail(ParseErrorKind::Malformed {
                reason: "expected '(' after the condition name",
            })
        })?;
        let inner = text[open + 1..].strip_suffix(')').ok_or_else(|| {
            fail(ParseErrorKind::Malformed {
                reason: "expected the expression to end with ')'",
            })
        })?;

        let name = text[..open].trim();
        if !is_identifier(name) {
            return Err(fail(ParseErrorKind::Malformed {
                reason: "condition name must be an identifier",
            }));
        }
        let form = FORMS.iter().find(|f| f.name == name).ok_or_else(|| {
            fail(ParseErrorKind::UnknownForm {
                name: name.to_string(),
            })
        })?;
        let (arity, expected, build) = match form.args {
            Args::Path => return load_file(inner).map_err(fail),
            Args::Numbers {
                arity,
                expected,
                build,
            } => (arity, expected, build),
        };
        if inner.contains(['(', ')']) {
            return Err(fail(ParseErrorKind::Malformed {
                reason: "nested parentheses are not allowed",
            }));
        }

        let args: SmallVec<[f64; 8]> = if inner.trim().is_empty() {
            SmallVec::new()
        } else {
            inner
                .split(',')
                .enumerate()
                .map(|(position, raw)| parse_number(position, raw))
                .collect::<Result<_, _>>()
                .map_err(fail)?
        };
        if !arity.accepts(args.len()) {
            return Err(fail(ParseErrorKind::WrongArity {
                name: form.name,
                expected,
                found: args.len(),
            }));
        }
        build(&args).map_err(fail)
    }

    /// `(name, usage)` for every recognized form, in registration order.
    pub fn forms() -> impl Iterator<Item = (&'static str, &'static str)> {
        FORMS.iter().map(|f| (f.name, f.usage))
    }

    /// The form's identifier (e.g. `"sin"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Const { .. } => "const",
            Self::Spikes { .. } => "spikes",
            Self::Sin { .. } => "sin",
            Self::Ramp { .. } => "ramp",
            Self::Step { .. } => "step",
            Self::Rand { .. } => "rand",
            Self::File { .. } => "file",
        }
    }

    /// Value at grid point `index`.
    pub fn evaluate(&self, index: usize, grid: &GridSpec) -> f64 {
        let x = grid.x(index);
        match self {
            Self::Const { value } => *value,
            Self::Spikes { base, spikes } => spikes
                .iter()
                .rev()
                .find(|s| s.index == index)
                .map_or(*base, |s| s.amplitude),
            Self::Sin {
                amplitude,
                frequency,
            } => amplitude * (PI * frequency * x).sin(),
            Self::Ramp { left, right } => {
                if grid.nx <= 1 {
                    *left
                } else {
                    left + (right - left) * index as f64 / (grid.nx - 1) as f64
                }
            }
            Self::Step { left, xmid, right } => {
                if x < *xmid {
                    *left
                } else {
                    *right
                }
            }
            Self::Rand {
                seed,
                base,
                amplitude,
            } => base + amplitude * uniform_at(*seed, index),
            Self::File { values, .. } => values.get(index).copied().unwrap_or(f64::NAN),
        }
    }

    /// Check that the expression fits a grid: spike indices in range and
    /// file curves with exactly one value per point.
    ///
    /// # Errors
    ///
    /// Returns [`HeatError::InvalidParameter`] naming the first spike index
    /// that lies beyond the last grid point, or a file whose value count
    /// differs from `grid.nx`.
    pub fn check_grid(&self, grid: &GridSpec) -> Result<(), HeatError> {
        match self {
            Self::Spikes { spikes, .. } => {
                if let Some(s) = spikes.iter().find(|s| s.index >= grid.nx) {
                    return Err(HeatError::invalid(
                        "ic",
                        format!(
                            "spike index {} is outside a grid of {} points",
                            s.index, grid.nx
                        ),
                    ));
                }
            }
            Self::File { path, values } if values.len() != grid.nx => {
                return Err(HeatError::invalid(
                    "ic",
                    format!(
                        "{} holds {} values for a grid of {} points",
                        path.display(),
                        values.len(),
                        grid.nx
                    ),
                ));
            }
            _ => {}
        }
        Ok(())
    }

    /// Sample the expression on every point of `grid`.
    pub fn sample(&self, grid: &GridSpec) -> GridField {
        let values = (0..grid.nx).map(|i| self.evaluate(i, grid)).collect();
        GridField::from_values(values, grid.dx)
    }
}

impl fmt::Display for ConditionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const { value } => write!(f, "const({value})"),
            Self::Spikes { base, spikes } => {
                write!(f, "spikes({base}")?;
                for s in spikes {
                    write!(f, ",{},{}", s.amplitude, s.index)?;
                }
                write!(f, ")")
            }
            Self::Sin {
                amplitude,
                frequency,
            } => write!(f, "sin({amplitude},{frequency})"),
            Self::Ramp { left, right } => write!(f, "ramp({left},{right})"),
            Self::Step { left, xmid, right } => write!(f, "step({left},{xmid},{right})"),
            Self::Rand {
                seed,
                base,
                amplitude,
            } => write!(f, "rand({seed},{base},{amplitude})"),
            Self::File { path, .. } => write!(f, "file({})", path.display()),
        }
    }
}
