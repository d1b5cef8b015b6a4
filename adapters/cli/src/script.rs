//! Line-based input scripts that stand in for a keyboard.
//!
//! Every symbol is one frame. Blank lines and lines starting with `#` are
//! skipped, whitespace inside a line is ignored.
//!
//! | Symbol | Intent |
//! |---|---|
//! | `w` `a` `s` `d` | move north, west, south, east |
//! | `b` | place a bomb |
//! | `k` | unlock the faced door |
//! | `.` | wait one frame |
//! | `q` | quit |

use std::iter;

use log::warn;
use tile_bomber_core::Direction;
use tile_bomber_simulation::FrameInput;

/// Ordered frame inputs parsed from a script.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Script {
    frames: Vec<FrameInput>,
}

impl Script {
    /// Parses script text, warning about symbols it does not understand.
    pub(crate) fn parse(text: &str) -> Self {
        let mut frames = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            for symbol in line.chars().filter(|symbol| !symbol.is_whitespace()) {
                match frame_for(symbol) {
                    Some(frame) => frames.push(frame),
                    None => warn!("ignoring unknown script symbol {symbol:?}"),
                }
            }
        }
        Self { frames }
    }

    /// Number of scripted frames.
    pub(crate) fn len(&self) -> usize {
        self.frames.len()
    }

    /// Frames in order with `idle` empty frames after each scripted one.
    pub(crate) fn paced(&self, idle: usize) -> impl Iterator<Item = FrameInput> + '_ {
        self.frames.iter().flat_map(move |frame| {
            iter::once(*frame).chain(iter::repeat(FrameInput::default()).take(idle))
        })
    }
}

fn frame_for(symbol: char) -> Option<FrameInput> {
    let frame = match symbol.to_ascii_lowercase() {
        'w' => FrameInput::moving(Direction::North),
        'a' => FrameInput::moving(Direction::West),
        's' => FrameInput::moving(Direction::South),
        'd' => FrameInput::moving(Direction::East),
        'b' => FrameInput {
            place_bomb: true,
            ..FrameInput::default()
        },
        'k' => FrameInput {
            use_key: true,
            ..FrameInput::default()
        },
        'q' => FrameInput {
            quit: true,
            ..FrameInput::default()
        },
        '.' => FrameInput::default(),
        _ => return None,
    };
    Some(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let script = Script::parse("# warm up\n\n  dd b\n#q\n..\n");
        let frames: Vec<_> = script.paced(0).collect();
        assert_eq!(
            frames,
            vec![
                FrameInput::moving(Direction::East),
                FrameInput::moving(Direction::East),
                FrameInput {
                    place_bomb: true,
                    ..FrameInput::default()
                },
                FrameInput::default(),
                FrameInput::default(),
            ]
        );
    }

    #[test]
    fn symbols_are_case_insensitive() {
        let upper: Vec<_> = Script::parse("WASDKQ").paced(0).collect();
        let lower: Vec<_> = Script::parse("wasdkq").paced(0).collect();
        assert_eq!(upper, lower);
        assert!(upper[5].quit);
        assert!(upper[4].use_key);
    }

    #[test]
    fn unknown_symbols_are_dropped() {
        let script = Script::parse("d?x!s");
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn pacing_inserts_idle_frames_after_each_intent() {
        let frames: Vec<_> = Script::parse("ds").paced(2).collect();
        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0], FrameInput::moving(Direction::East));
        assert!(frames[1].is_idle() && frames[2].is_idle());
        assert_eq!(frames[3], FrameInput::moving(Direction::South));
    }
}
