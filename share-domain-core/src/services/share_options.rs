//! 分享选项生成

use crate::types::{Domain, ShareOption, ORIGINAL_OPTION_ID, ORIGINAL_OPTION_NAME};
use crate::utils::url::rewrite_share_link;

/// 生成分享选项列表
///
/// 第一项始终是原始链接，其后是已启用的自定义域名（保持注册顺序）。
/// 默认域名被禁用或不存在时，结果中没有任何默认项。
pub fn build_share_options(
    domains: &[Domain],
    canonical_url: &str,
    default_domain_id: Option<&str>,
) -> Vec<ShareOption> {
    let mut options = Vec::with_capacity(domains.len() + 1);

    options.push(ShareOption {
        id: ORIGINAL_OPTION_ID.to_string(),
        name: ORIGINAL_OPTION_NAME.to_string(),
        url: canonical_url.to_string(),
        is_default: default_domain_id.is_none(),
    });

    options.extend(domains.iter().filter(|d| d.enabled).map(|domain| ShareOption {
        id: domain.id.clone(),
        name: domain.name.clone(),
        url: rewrite_share_link(canonical_url, &domain.url).into_value(),
        is_default: default_domain_id == Some(domain.id.as_str()),
    }));

    options
}
