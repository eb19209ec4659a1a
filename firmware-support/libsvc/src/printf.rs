// SPDX-FileCopyrightText: 2026 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! A minimal `printf`.

[`vprintf`] walks a C-style format string and writes the result to a
[`CharSink`] one byte at a time. Arguments are passed as a slice of [`Arg`],
normally built by the [`printf!`](crate::printf!) macro.

Supported directives are `%d`/`%i`, `%u`, `%x`, `%X`, `%s`, `%c` and `%%`,
each optionally preceded by a `0` flag, a field width and length modifiers
(`l`, `h`, `z`, `j`, `t`, `L`) that are accepted and ignored since every
integer argument is 32 bits wide.

Nothing here can fail. An unknown conversion such as `%q` is echoed as is,
and a directive cut off by the end of the format string is echoed verbatim.

Numbers are turned into digits with [`divmod_u32`], so no hardware divider
is needed.
*/

use core::ffi::CStr;
use core::slice::Iter;

use heapless::Vec;

use crate::divmod::divmod_u32;
use crate::stdio::CharSink;

/// Printed for a `%s` whose argument is absent.
pub const NULL_PLACEHOLDER: &[u8] = b"(null)";

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Longest digit sequence of a `u32`, in decimal.
const MAX_DIGITS: usize = 10;

/// Widest field a directive can ask for. Larger widths are clamped.
pub const MAX_WIDTH: u32 = 255;

/// One argument of a [`vprintf`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    Signed(i32),
    Unsigned(u32),
    /// A string, possibly NUL-terminated. `None` is a null string.
    Str(Option<&'a [u8]>),
    Char(u8),
}

impl<'a> Arg<'a> {
    /// The argument as a signed integer, reinterpreting the bits of
    /// unsigned values.
    pub fn as_i32(&self) -> i32 {
        self.as_u32() as i32
    }

    /// The argument as an unsigned integer, reinterpreting the bits of
    /// signed values. Strings read as `0`.
    pub fn as_u32(&self) -> u32 {
        match *self {
            Arg::Signed(v) => v as u32,
            Arg::Unsigned(v) => v,
            Arg::Char(c) => u32::from(c),
            Arg::Str(_) => 0,
        }
    }

    /// The argument as a character: the low byte of integers.
    pub fn as_char(&self) -> u8 {
        match *self {
            Arg::Char(c) => c,
            _ => self.as_u32() as u8,
        }
    }

    /// The bytes of a string argument up to its terminating NUL, if any.
    pub fn as_str(&self) -> Option<&'a [u8]> {
        match *self {
            Arg::Str(s) => s.map(until_nul),
            _ => None,
        }
    }
}

macro_rules! impl_from_for_arg {
    ($variant:ident => $($ty:ty),+) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    Arg::$variant(value as _)
                }
            }
        )+
    };
}

impl_from_for_arg!(Signed => i8, i16, i32, isize);
impl_from_for_arg!(Unsigned => u8, u16, u32, usize);

impl From<char> for Arg<'_> {
    fn from(c: char) -> Self {
        Arg::Char(u8::try_from(c).unwrap_or(b'?'))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(Some(s.as_bytes()))
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(s: &'a [u8; N]) -> Self {
        Arg::Str(Some(s))
    }
}

impl<'a> From<&'a CStr> for Arg<'a> {
    fn from(s: &'a CStr) -> Self {
        Arg::Str(Some(s.to_bytes()))
    }
}

impl<'a> From<Option<&'a str>> for Arg<'a> {
    fn from(s: Option<&'a str>) -> Self {
        Arg::Str(s.map(str::as_bytes))
    }
}

/// What a directive converts its argument to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    Signed,
    Unsigned,
    HexLower,
    HexUpper,
    Str,
    Char,
    Percent,
    /// Any other character. Echoed back together with the `%`.
    Unknown(u8),
}

impl Conversion {
    fn from_byte(b: u8) -> Conversion {
        match b {
            b'd' | b'i' => Conversion::Signed,
            b'u' => Conversion::Unsigned,
            b'x' => Conversion::HexLower,
            b'X' => Conversion::HexUpper,
            b's' => Conversion::Str,
            b'c' => Conversion::Char,
            b'%' => Conversion::Percent,
            other => Conversion::Unknown(other),
        }
    }
}

/// A parsed `%` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub conversion: Conversion,
    /// Minimum field width, at most [`MAX_WIDTH`].
    pub width: u32,
    /// Pad with `'0'` instead of `' '`.
    pub zero_pad: bool,
}

/// Parse the directive in `input`, which starts right after a `%`.
///
/// Returns the directive and the number of bytes it spans, or `None` when
/// `input` ends before the conversion character.
pub fn parse_directive(input: &[u8]) -> Option<(Directive, usize)> {
    let mut i = 0;

    let zero_pad = input.first() == Some(&b'0');
    if zero_pad {
        i += 1;
    }

    let mut width: u32 = 0;
    while let Some(&d) = input.get(i).filter(|d| d.is_ascii_digit()) {
        width = width.saturating_mul(10).saturating_add(u32::from(d - b'0'));
        i += 1;
    }

    while matches!(input.get(i), Some(b'l' | b'h' | b'z' | b'j' | b't' | b'L')) {
        i += 1;
    }

    let conversion = Conversion::from_byte(*input.get(i)?);
    let directive = Directive {
        conversion,
        width: width.min(MAX_WIDTH),
        zero_pad,
    };
    Some((directive, i + 1))
}

/// Format `args` according to `format` and write the result to `sink`.
///
/// `format` ends at its first NUL byte, if it has one. If any written
/// character was a newline, the sink is flushed once after the whole format
/// string has been processed.
///
/// Returns the number of characters written, padding and signs included.
pub fn vprintf<S, F>(sink: &mut S, format: &F, args: &[Arg<'_>]) -> usize
where
    S: CharSink + ?Sized,
    F: AsRef<[u8]> + ?Sized,
{
    let mut out = Emitter {
        sink,
        written: 0,
        newline: false,
    };
    let mut args = args.iter();
    let mut rest = until_nul(format.as_ref());

    while let Some((&b, tail)) = rest.split_first() {
        if b != b'%' {
            out.emit(b);
            rest = tail;
            continue;
        }

        match parse_directive(tail) {
            Some((directive, len)) => {
                out.directive(&directive, &mut args);
                rest = &tail[len..];
            }
            None => {
                out.emit(b'%');
                out.emit_all(tail);
                rest = &[];
            }
        }
    }

    out.finish()
}

/// Format and print to a [`CharSink`], C style.
///
/// ```ignore
/// let mut uart = unsafe { libsvc::stdio::console() };
/// libsvc::printf!(&mut uart, "DMIPS/MHz: %u.%03u\n", 0u32, 567u32);
/// ```
#[macro_export]
macro_rules! printf {
    ($sink:expr, $format:expr $(, $arg:expr)* $(,)?) => {
        $crate::printf::vprintf(
            $sink,
            $format,
            &[$($crate::printf::Arg::from($arg)),*],
        )
    };
}

struct Emitter<'s, S: ?Sized> {
    sink: &'s mut S,
    written: usize,
    newline: bool,
}

impl<S: CharSink + ?Sized> Emitter<'_, S> {
    fn emit(&mut self, b: u8) {
        self.sink.put_byte(b);
        self.written += 1;
        self.newline |= b == b'\n';
    }

    fn emit_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.emit(b);
        }
    }

    fn pad(&mut self, count: usize, fill: u8) {
        for _ in 0..count {
            self.emit(fill);
        }
    }

    fn directive(&mut self, d: &Directive, args: &mut Iter<'_, Arg<'_>>) {
        match d.conversion {
            Conversion::Percent => self.emit(b'%'),
            Conversion::Unknown(c) => {
                self.emit(b'%');
                self.emit(c);
            }
            Conversion::Signed => {
                let v = args.next().map_or(0, Arg::as_i32);
                self.number(v.unsigned_abs(), 10, LOWER_DIGITS, v < 0, d);
            }
            Conversion::Unsigned => {
                let v = args.next().map_or(0, Arg::as_u32);
                self.number(v, 10, LOWER_DIGITS, false, d);
            }
            Conversion::HexLower => {
                let v = args.next().map_or(0, Arg::as_u32);
                self.number(v, 16, LOWER_DIGITS, false, d);
            }
            Conversion::HexUpper => {
                let v = args.next().map_or(0, Arg::as_u32);
                self.number(v, 16, UPPER_DIGITS, false, d);
            }
            Conversion::Str => {
                let s = args.next().and_then(Arg::as_str);
                self.field(s.unwrap_or(NULL_PLACEHOLDER), d);
            }
            Conversion::Char => {
                let c = args.next().map_or(0, Arg::as_char);
                self.field(&[c], d);
            }
        }
    }

    fn field(&mut self, bytes: &[u8], d: &Directive) {
        let fill = if d.zero_pad { b'0' } else { b' ' };
        self.pad((d.width as usize).saturating_sub(bytes.len()), fill);
        self.emit_all(bytes);
    }

    fn number(
        &mut self,
        magnitude: u32,
        base: u32,
        table: &[u8; 16],
        negative: bool,
        d: &Directive,
    ) {
        // Least significant digit first.
        let mut digits: Vec<u8, MAX_DIGITS> = Vec::new();
        let mut value = magnitude;
        loop {
            let (q, r) = divmod_u32(value, base);
            // Cannot fail: MAX_DIGITS covers a u32 in base 10.
            let _ = digits.push(table[r as usize]);
            value = q;
            if value == 0 {
                break;
            }
        }

        let mut width = d.width as usize;
        if negative {
            self.emit(b'-');
            width = width.saturating_sub(1);
        }

        let fill = if d.zero_pad { b'0' } else { b' ' };
        self.pad(width.saturating_sub(digits.len()), fill);
        for &c in digits.iter().rev() {
            self.emit(c);
        }
    }

    fn finish(self) -> usize {
        if self.newline {
            self.sink.flush();
        }
        self.written
    }
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stdio::Capture;
    use proptest::prelude::*;
    use test_strategy::proptest;

    type Out = Capture<256>;

    fn render(format: &str, args: &[Arg<'_>]) -> (std::string::String, usize) {
        let mut out = Out::new();
        let n = vprintf(&mut out, format, args);
        let text = std::string::String::from_utf8(out.as_bytes().to_vec()).unwrap();
        (text, n)
    }

    fn text(format: &str, args: &[Arg<'_>]) -> std::string::String {
        render(format, args).0
    }

    #[test]
    fn unsigned_decimal() {
        assert_eq!(render("%u", &[42u32.into()]), ("42".into(), 2));
        assert_eq!(text("%u", &[0u32.into()]), "0");
        assert_eq!(text("%u", &[u32::MAX.into()]), "4294967295");
    }

    #[test]
    fn signed_zero_pad_counts_the_sign() {
        assert_eq!(render("%05d", &[(-7).into()]), ("-0007".into(), 5));
        assert_eq!(text("Signed: %d", &[(-42).into()]), "Signed: -42");
        assert_eq!(text("%d", &[i32::MIN.into()]), "-2147483648");
        assert_eq!(text("%i", &[17.into()]), "17");
    }

    #[test]
    fn space_padded_negative_puts_sign_first() {
        assert_eq!(text("[%5d]", &[(-7).into()]), "[-   7]");
    }

    #[test]
    fn hex() {
        assert_eq!(text("%x", &[0xdead_beefu32.into()]), "deadbeef");
        assert_eq!(text("%X", &[0xdead_beefu32.into()]), "DEADBEEF");
        assert_eq!(text("0x%08x", &[0xdeadu32.into()]), "0x0000dead");
        assert_eq!(text("%x", &[(-1).into()]), "ffffffff");
        assert_eq!(text("%x", &[0u32.into()]), "0");
    }

    #[test]
    fn width_and_padding() {
        assert_eq!(text("Width 5: [%5u]", &[42u32.into()]), "Width 5: [   42]");
        assert_eq!(text("[%03u]", &[5u32.into()]), "[005]");
        assert_eq!(text("[%04u]", &[42u32.into()]), "[0042]");
        assert_eq!(text("[%05u]", &[123u32.into()]), "[00123]");
        assert_eq!(text("%03u", &[0u32.into()]), "000");
        assert_eq!(text("%010u", &[123_456_789u32.into()]), "0123456789");
        assert_eq!(text("%2u", &[12345u32.into()]), "12345");
        assert_eq!(
            text("DMIPS/MHz: %u.%03u", &[0u32.into(), 567u32.into()]),
            "DMIPS/MHz: 0.567"
        );
    }

    #[test]
    fn huge_width_is_clamped() {
        let mut out = Capture::<300>::new();
        let n = vprintf(&mut out, "[%4294967295u]", &[7u32.into()]);
        assert_eq!(n, MAX_WIDTH as usize + 2);
        assert_eq!(out.as_bytes().len(), n);
        assert!(out.as_bytes().ends_with(b"  7]"));

        let mut out = Capture::<8>::new();
        let n = vprintf(&mut out, "%0999999x", &[0xabu32.into()]);
        assert_eq!(n, MAX_WIDTH as usize);
        assert_eq!(out.dropped(), MAX_WIDTH as usize - 8);
    }

    #[test]
    fn length_modifiers_are_ignored() {
        let args = [7u32.into(), (-3).into(), 255u32.into(), 9usize.into()];
        assert_eq!(text("%lu %lld %hx %zu", &args), "7 -3 ff 9");
        assert_eq!(text("%08lx", &[0xbeefu32.into()]), "0000beef");
    }

    #[test]
    fn strings_and_chars() {
        assert_eq!(text("name=%s", &["First".into()]), "name=First");
        assert_eq!(render("%s", &[Arg::Str(None)]), ("(null)".into(), 6));
        assert_eq!(text("%s", &[b"abc\0def".into()]), "abc");
        assert_eq!(text("[%5s]", &["ab".into()]), "[   ab]");
        assert_eq!(text("%c%c", &['o'.into(), b'k'.into()]), "ok");
        assert_eq!(text("[%3c]", &['x'.into()]), "[  x]");
        assert_eq!(text("%s", &[5u32.into()]), "(null)");
    }

    #[test]
    fn c_strings() {
        let s = CStr::from_bytes_with_nul(b"Second\0").unwrap();
        assert_eq!(text("%s", &[s.into()]), "Second");
    }

    #[test]
    fn percent_and_unknown() {
        assert_eq!(render("100%%", &[]), ("100%".into(), 4));
        assert_eq!(render("%q", &[0u32.into()]), ("%q".into(), 2));
        assert_eq!(text("%5q%u", &[3u32.into()]), "%q3");
    }

    #[test]
    fn truncated_directive_is_echoed() {
        assert_eq!(render("abc%", &[]), ("abc%".into(), 4));
        assert_eq!(text("x%05", &[1u32.into()]), "x%05");
        assert_eq!(text("%l", &[]), "%l");
    }

    #[test]
    fn format_stops_at_nul() {
        assert_eq!(text("shown\0hidden %u", &[1u32.into()]), "shown");
    }

    #[test]
    fn missing_arguments_read_as_zero() {
        assert_eq!(text("%u %d %x %s", &[]), "0 0 0 (null)");
    }

    #[test]
    fn signedness_is_reinterpreted() {
        assert_eq!(text("%u", &[(-1).into()]), "4294967295");
        assert_eq!(text("%d", &[u32::MAX.into()]), "-1");
    }

    #[test]
    fn newline_flushes_once_at_the_end() {
        let mut out = Out::new();
        let n = vprintf(&mut out, "a\nb\nc", &[]);

        assert_eq!(n, 5);
        assert_eq!(out.flushes(), 1);
        assert_eq!(out.flushed_at(), Some(5));
    }

    #[test]
    fn newline_from_arguments_flushes() {
        let mut out = Out::new();
        vprintf(&mut out, "%s", &["line\n".into()]);
        assert_eq!(out.flushes(), 1);

        let mut out = Out::new();
        vprintf(&mut out, "%c", &['\n'.into()]);
        assert_eq!(out.flushes(), 1);
    }

    #[test]
    fn no_newline_no_flush() {
        let mut out = Out::new();
        vprintf(&mut out, "%u%s", &[1u32.into(), "x".into()]);
        assert_eq!(out.flushes(), 0);
    }

    #[test]
    fn macro_builds_arguments() {
        let mut out = Out::new();
        let n = crate::printf!(&mut out, "p1: value=%d, name=%s\n", 42, "First");

        assert_eq!(out.as_bytes(), b"p1: value=42, name=First\n");
        assert_eq!(n, 25);
        assert_eq!(out.flushes(), 1);
    }

    #[test]
    fn parses_directives() {
        assert_eq!(
            parse_directive(b"08lx tail"),
            Some((
                Directive {
                    conversion: Conversion::HexLower,
                    width: 8,
                    zero_pad: true
                },
                4
            ))
        );
        assert_eq!(
            parse_directive(b"%"),
            Some((
                Directive {
                    conversion: Conversion::Percent,
                    width: 0,
                    zero_pad: false
                },
                1
            ))
        );
        assert_eq!(parse_directive(b"12"), None);
        assert_eq!(
            parse_directive(b"99999999999u").map(|(d, _)| d.width),
            Some(MAX_WIDTH)
        );
        assert_eq!(
            parse_directive(b"256d").map(|(d, len)| (d.width, len)),
            Some((MAX_WIDTH, 4))
        );
    }

    #[proptest]
    fn unsigned_matches_core_fmt(value: u32, #[strategy(0u32..16)] width: u32, zero: bool) {
        let format = if zero {
            std::format!("%0{width}u|%0{width}x|%0{width}X")
        } else {
            std::format!("%{width}u|%{width}x|%{width}X")
        };
        let w = width as usize;
        let expected = if zero {
            std::format!("{value:0w$}|{value:0w$x}|{value:0w$X}")
        } else {
            std::format!("{value:w$}|{value:w$x}|{value:w$X}")
        };

        let (text, n) = render(&format, &[value.into(), value.into(), value.into()]);
        prop_assert_eq!(&text, &expected);
        prop_assert_eq!(n, expected.len());
    }

    #[proptest]
    fn signed_zero_pad_places_sign_before_padding(value: i32, #[strategy(0u32..16)] width: u32) {
        let format = std::format!("%0{width}d");
        let w = width as usize;
        let expected = if value < 0 {
            std::format!("-{:0w$}", value.unsigned_abs(), w = w.saturating_sub(1))
        } else {
            std::format!("{value:0w$}")
        };

        prop_assert_eq!(text(&format, &[value.into()]), expected);
    }
}
