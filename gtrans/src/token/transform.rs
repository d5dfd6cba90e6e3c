use super::{KeyPair, Token};

// 每个字符后执行的混合程序，以及循环结束后的收尾程序
const LOOP_PROGRAM: &[u8] = b"+-a^+6";
const FINAL_PROGRAM: &[u8] = b"+-3^+b+-f";
const TOKEN_MODULUS: u32 = 1_000_000;

/// 用密钥对计算`text`的令牌
///
/// 按UTF-16码元逐个累加，所有运算都是32位回绕的。同样的输入总是得到同样的结果，且不会失败。
pub fn derive(text: &str, pair: KeyPair) -> Token {
    let acc = accumulate(pair.seed_bits(), text.encode_utf16());
    let acc = mix(acc, FINAL_PROGRAM) ^ pair.mask_bits();

    // 符号位为1时 (acc & 0x7FFFFFFF) + 0x80000000，也就是按无符号数取值，u32本身就是这个值
    let value = acc % TOKEN_MODULUS;
    Token::new(value, value ^ pair.seed_bits())
}

fn accumulate(seed: u32, units: impl IntoIterator<Item = u16>) -> u32 {
    units.into_iter().fold(seed, |acc, unit| {
        mix(acc.wrapping_add(u32::from(unit)), LOOP_PROGRAM)
    })
}

/// 每3个字节一组：`(合并方式, 移位方向, 位数)`
///
/// - 合并方式: `+`为回绕加法，否则异或
/// - 移位方向: `+`为逻辑右移(不带符号扩展)，否则左移并丢弃溢出位
/// - 位数: 小写字母为`ascii - 87`(`a` = 10)，否则为数字值
fn mix(acc: u32, program: &[u8]) -> u32 {
    program.chunks_exact(3).fold(acc, |acc, op| {
        let magnitude = shift_magnitude(op[2]);
        let shifted = if op[1] == b'+' {
            acc.wrapping_shr(magnitude)
        } else {
            acc.wrapping_shl(magnitude)
        };
        if op[0] == b'+' {
            acc.wrapping_add(shifted)
        } else {
            acc ^ shifted
        }
    })
}

// 移位位数只看低5位，和32位整数的移位规则一致，wrapping_shl/shr已经保证
fn shift_magnitude(c: u8) -> u32 {
    if c >= b'a' {
        u32::from(c) - 87
    } else {
        char::from(c).to_digit(10).unwrap_or(0)
    }
}
