//! Storefront category lookup and affiliate link construction

pub const STOREFRONT_ROOT: &str = "https://www.yoro-store.com/";

/// Category keywords checked in order; the first one contained in the query wins
pub const CATEGORY_SLUGS: [(&str, &str); 9] = [
  ("オイルフィルター", "oil-filter"),
  ("エアフィルター", "air-filter"),
  ("キャビンフィルター", "cabin-filter"),
  ("ブレーキパッド", "brake-pad"),
  ("ワイパー", "wiper"),
  ("プラグ", "spark-plug"),
  ("バッテリー", "battery"),
  ("ATF", "atf"),
  ("エンジンオイル", "engine-oil"),
];

/// Moshimo affiliate identifiers for one deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateConfig {
  pub a_id: String,
  pub p_id: String,
  pub pc_id: String,
  pub pl_id: String,
}

impl Default for AffiliateConfig {
  fn default() -> Self {
    Self {
      a_id: "5205457".to_string(),
      p_id: "5797".to_string(),
      pc_id: "16051".to_string(),
      pl_id: "74384".to_string(),
    }
  }
}

impl AffiliateConfig {
  /// Wrap a storefront URL in the affiliate click-through redirect
  pub fn wrap(&self, target: &str) -> String {
    format!(
      "https://af.moshimo.com/af/c/click?a_id={}&p_id={}&pc_id={}&pl_id={}&m_url={}",
      self.a_id,
      self.p_id,
      self.pc_id,
      self.pl_id,
      urlencoding::encode(target)
    )
  }

  /// Affiliate link for a free-text part query
  pub fn link_for(&self, query: &str) -> String {
    self.wrap(&storefront_url(query))
  }
}

/// Category slug for the first keyword contained in `query`
pub fn category_for(query: &str) -> Option<&'static str> {
  CATEGORY_SLUGS
    .iter()
    .find(|(keyword, _)| query.contains(keyword))
    .map(|(_, slug)| *slug)
}

/// Category page for `query`, or the storefront root when nothing matches
pub fn storefront_url(query: &str) -> String {
  match category_for(query) {
    Some(slug) => format!("{STOREFRONT_ROOT}product-category/{slug}/"),
    None => STOREFRONT_ROOT.to_string(),
  }
}

/// Path of the local redirect endpoint for `query`
pub fn redirect_path(query: &str) -> String {
  format!("/redirect-endpoint?q={}", urlencoding::encode(query))
}
