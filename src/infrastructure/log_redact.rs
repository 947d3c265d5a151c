//! 日志脱敏
//!
//! 派生出的地址只以截断形式进入日志；密钥材料从不进入日志。

/// 脱敏地址（显示前6位和后4位）
///
/// 按字符而不是字节截断，调用方传入的任意字符串都不会在切片时 panic。
pub fn redact_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 10 {
        return "*".repeat(chars.len());
    }

    let prefix: String = chars[..6].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_address() {
        let address = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bFd2";
        assert_eq!(redact_address(address), "0x742d...bFd2");
        assert_eq!(
            redact_address("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"),
            "bc1qar...5mdq"
        );
    }

    #[test]
    fn test_short_input_fully_masked() {
        assert_eq!(redact_address("0x12"), "****");
        assert_eq!(redact_address(""), "");
    }

    #[test]
    fn test_multibyte_input() {
        assert_eq!(
            redact_address("地址地址地址地址地址地址"),
            "地址地址地址...地址地址"
        );
    }
}
