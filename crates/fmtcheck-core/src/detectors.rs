//! 字节级检测器：每条规则一个小状态机
//!
//! 两种引擎共用同一套状态机：逐字节 `feed`，流结束后 `finish`。
//! 状态只有一两个计数器，不回溯、不缓冲。
use std::num::NonZeroUsize;
use std::path::Path;

use crate::error::Violation;
use crate::rules::RuleKind;

const LF: u8 = 10;
const CR: u8 = 13;
const TAB: u8 = 9;
const SPACE: u8 = 32;

/// 单条规则的扫描状态
pub(crate) trait ByteCheck {
    /// 处理一个字节；返回 Some 表示首个违规（之后不应继续喂入）
    fn feed(&mut self, byte: u8) -> Option<Violation>;

    /// 流结束
    fn finish(&mut self) -> Option<Violation> {
        None
    }
}

/// 为指定规则构造检测器
pub(crate) fn detector_for<'a>(rule: RuleKind, path: &'a Path, tab_size: NonZeroUsize) -> Box<dyn ByteCheck + 'a> {
    match rule {
        RuleKind::LineEndings => Box::new(ForbiddenByte::new(path, CR, |path, line| Violation::WindowsLineEnding { path, line })),
        RuleKind::Tabs => Box::new(ForbiddenByte::new(path, TAB, |path, line| Violation::TabCharacterPresent { path, line })),
        RuleKind::Indentation => Box::new(Indentation::new(path, tab_size)),
        RuleKind::TrailingWhitespace => Box::new(TrailingWhitespace::new(path)),
        RuleKind::FinalNewline => Box::new(FinalNewline::new(path)),
        RuleKind::PlainAscii => Box::new(PlainAscii::new(path)),
    }
}

/// 出现某个字节即失败（CR / TAB）。LF 先计行，再比较。
struct ForbiddenByte<'a> {
    path: &'a Path,
    forbidden: u8,
    line: usize,
    make: fn(std::path::PathBuf, usize) -> Violation,
}

impl<'a> ForbiddenByte<'a> {
    fn new(path: &'a Path, forbidden: u8, make: fn(std::path::PathBuf, usize) -> Violation) -> Self {
        Self { path, forbidden, line: 1, make }
    }
}

impl ByteCheck for ForbiddenByte<'_> {
    fn feed(&mut self, byte: u8) -> Option<Violation> {
        if byte == LF {
            self.line += 1;
        }
        (byte == self.forbidden).then(|| (self.make)(self.path.to_path_buf(), self.line))
    }
}

/// 行首空格计数。只有“非空格且非 LF”的字节才结束计数并触发检查，
/// 全空格行交给 trailing-whitespace 处理。
struct Indentation<'a> {
    path: &'a Path,
    tab_size: NonZeroUsize,
    line: usize,
    spaces: usize,
    counting: bool,
}

impl<'a> Indentation<'a> {
    fn new(path: &'a Path, tab_size: NonZeroUsize) -> Self {
        Self { path, tab_size, line: 1, spaces: 0, counting: true }
    }
}

impl ByteCheck for Indentation<'_> {
    fn feed(&mut self, byte: u8) -> Option<Violation> {
        if byte == LF {
            self.line += 1;
            self.spaces = 0;
            self.counting = true;
            return None;
        }
        if !self.counting {
            return None;
        }
        if byte == SPACE {
            self.spaces += 1;
            return None;
        }
        self.counting = false;
        (self.spaces % self.tab_size.get() != 0).then(|| Violation::BadIndentationWidth {
            path: self.path.to_path_buf(),
            expected_unit: self.tab_size.get(),
            line: self.line,
        })
    }
}

/// LF 之前的连续空格数必须为 0
struct TrailingWhitespace<'a> {
    path: &'a Path,
    line: usize,
    spaces: usize,
}

impl<'a> TrailingWhitespace<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, line: 1, spaces: 0 }
    }
}

impl ByteCheck for TrailingWhitespace<'_> {
    fn feed(&mut self, byte: u8) -> Option<Violation> {
        if byte == LF {
            if self.spaces != 0 {
                return Some(Violation::TrailingWhitespace { path: self.path.to_path_buf(), line: self.line });
            }
            self.line += 1;
        }
        if byte == SPACE {
            self.spaces += 1;
        } else {
            self.spaces = 0;
        }
        None
    }
}

/// 文件末尾连续 LF 的个数必须恰好为 1
struct FinalNewline<'a> {
    path: &'a Path,
    linefeeds: usize,
}

impl<'a> FinalNewline<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, linefeeds: 0 }
    }
}

impl ByteCheck for FinalNewline<'_> {
    fn feed(&mut self, byte: u8) -> Option<Violation> {
        if byte == LF {
            self.linefeeds += 1;
        } else {
            self.linefeeds = 0;
        }
        None
    }

    fn finish(&mut self) -> Option<Violation> {
        (self.linefeeds != 1).then(|| Violation::FinalNewlineCount {
            path: self.path.to_path_buf(),
            actual_count: self.linefeeds,
        })
    }
}

struct PlainAscii<'a> {
    path: &'a Path,
    line: usize,
}

impl<'a> PlainAscii<'a> {
    fn new(path: &'a Path) -> Self {
        Self { path, line: 1 }
    }
}

impl ByteCheck for PlainAscii<'_> {
    fn feed(&mut self, byte: u8) -> Option<Violation> {
        if byte == LF {
            self.line += 1;
        }
        (!byte.is_ascii()).then(|| Violation::NonAsciiByte { path: self.path.to_path_buf(), line: self.line })
    }
}

/// 在内存字节上运行单条规则（测试与 fused 引擎对照用）
#[cfg(test)]
pub(crate) fn run_on_bytes(rule: RuleKind, bytes: &[u8], tab_size: usize) -> Option<Violation> {
    let path = Path::new("mem.cs");
    let tab_size = NonZeroUsize::new(tab_size).expect("non-zero tab size");
    let mut det = detector_for(rule, path, tab_size);
    for &b in bytes {
        if let Some(v) = det.feed(b) {
            return Some(v);
        }
    }
    det.finish()
}
