//! Share URL helpers: scheme normalization, validation and host rewriting

use url::Url;

use crate::types::Outcome;

/// 确保 URL 带有协议，没有则补上 `https://`
///
/// 幂等：`ensure_scheme(&ensure_scheme(x)) == ensure_scheme(x)`。
pub fn ensure_scheme(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    }
}

/// 是否为带主机名的 http/https 绝对 URL
pub fn is_valid_http_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}

/// 将规范分享链接改写到目标域名下
///
/// 协议、主机和端口取自 `target_domain_url`，路径、查询串和片段保持不变。
/// 任一输入无法解析时返回原链接并标记为 fallback。
pub fn rewrite_share_link(canonical_url: &str, target_domain_url: &str) -> Outcome<String> {
    match try_rewrite(canonical_url, target_domain_url) {
        Ok(url) => Outcome::success(url),
        Err(reason) => {
            log::warn!("Failed to rewrite share link {canonical_url} -> {target_domain_url}: {reason}");
            Outcome::fallback(canonical_url.to_string(), reason)
        }
    }
}

fn try_rewrite(canonical_url: &str, target_domain_url: &str) -> Result<String, String> {
    let mut url =
        Url::parse(canonical_url).map_err(|e| format!("invalid share URL: {e}"))?;
    let target =
        Url::parse(target_domain_url).map_err(|e| format!("invalid domain URL: {e}"))?;

    let host = target
        .host_str()
        .ok_or_else(|| format!("domain URL has no host: {target_domain_url}"))?;

    url.set_scheme(target.scheme())
        .map_err(|()| format!("cannot switch scheme to {}", target.scheme()))?;
    url.set_host(Some(host))
        .map_err(|e| format!("cannot set host {host}: {e}"))?;
    url.set_port(target.port())
        .map_err(|()| "cannot set port".to_string())?;

    Ok(url.to_string())
}

/// 拼接宿主规范分享链接：`<origin>/share/<token>[?password=<password>]`
pub fn build_share_url(origin: &str, token: &str, password: Option<&str>) -> String {
    let origin = origin.trim_end_matches('/');
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("{origin}/share/{token}?password={password}"),
        None => format!("{origin}/share/{token}"),
    }
}
