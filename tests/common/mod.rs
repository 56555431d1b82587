#![allow(dead_code)]

use actix_web::{test::TestRequest, HttpRequest, HttpResponse};
use actix_web_csp_compat::{CspOptions, DirectiveValue, SourceExpr};

pub const FIREFOX_4: &str = "Mozilla/5.0 (Windows NT 6.1; rv:2.0) Gecko/20100101 Firefox/4.0";
pub const FIREFOX_22: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:22.0) Gecko/20130405 Firefox/22.0";
pub const FIREFOX_23: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:23.0) Gecko/20100101 Firefox/23.0";
pub const FIREFOX_OS_1_4: &str = "Mozilla/5.0 (Mobile; rv:30.0) Gecko/30.0 Firefox/30.0";
pub const FIREFOX_OS_2_0: &str = "Mozilla/5.0 (Mobile; rv:32.0) Gecko/32.0 Firefox/32.0";
pub const FIREFOX_ANDROID_24: &str =
    "Mozilla/5.0 (Android; Mobile; rv:24.0) Gecko/24.0 Firefox/24.0";
pub const FIREFOX_ANDROID_25: &str =
    "Mozilla/5.0 (Android; Mobile; rv:25.0) Gecko/25.0 Firefox/25.0";

pub const CHROME_13: &str = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/535.1 (KHTML, like Gecko) Chrome/13.0.782.112 Safari/535.1";
pub const CHROME_20: &str = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/536.11 (KHTML, like Gecko) Chrome/20.0.1132.57 Safari/536.11";
pub const CHROME_27: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/27.0.1453.116 Safari/537.36";
pub const CHROME_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 7_0 like Mac OS X) AppleWebKit/537.51.1 (KHTML, like Gecko) CriOS/30.0.1599.12 Mobile/11A465 Safari/8536.25";
pub const CHROME_ANDROID_4_1: &str = "Mozilla/5.0 (Linux; Android 4.1.2; Nexus 7 Build/JZ054K) AppleWebKit/535.19 (KHTML, like Gecko) Chrome/18.0.1025.166 Safari/535.19";

pub const SAFARI_4_1: &str = "Mozilla/5.0 (Macintosh; U; PPC Mac OS X 10_4_11; en) AppleWebKit/533.19.4 (KHTML, like Gecko) Version/4.1.3 Safari/533.19.4";
pub const SAFARI_5_1_OSX: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_6_8) AppleWebKit/534.50 (KHTML, like Gecko) Version/5.1 Safari/534.50";
pub const SAFARI_5_1_WINDOWS: &str = "Mozilla/5.0 (Windows; U; Windows NT 6.0; en-US) AppleWebKit/534.50 (KHTML, like Gecko) Version/5.1 Safari/534.50";
pub const SAFARI_6: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_8_2) AppleWebKit/536.26.17 (KHTML, like Gecko) Version/6.0.2 Safari/536.26.17";
pub const SAFARI_7: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9) AppleWebKit/537.71 (KHTML, like Gecko) Version/7.0 Safari/537.71";

pub const IE_10: &str = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1; Trident/6.0)";
pub const IE_11: &str = "Mozilla/5.0 (Windows NT 6.3; Trident/7.0; rv:11.0) like Gecko";
pub const EDGE_12: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/42.0.2311.135 Safari/537.36 Edge/12.10136";

pub const OPERA_12: &str = "Opera/9.80 (Windows NT 6.1; WOW64) Presto/2.12.388 Version/12.16";
pub const OPERA_15: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/28.0.1500.52 Safari/537.36 OPR/15.0.1147.100";

pub const ANDROID_4_0: &str = "Mozilla/5.0 (Linux; U; Android 4.0.4; en-us; GT-I9300 Build/IMM76D) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";
pub const ANDROID_4_4_3: &str = "Mozilla/5.0 (Linux; U; Android 4.4.3; en-us; Nexus 4 Build/KTU84L) AppleWebKit/534.30 (KHTML, like Gecko) Version/4.0 Mobile Safari/534.30";

pub const UNKNOWN: &str = "unknow user agent";

pub const STANDARD: &str = "content-security-policy";
pub const MOZILLA: &str = "x-content-security-policy";
pub const WEBKIT: &str = "x-webkit-csp";
pub const ALL: [&str; 3] = [STANDARD, MOZILLA, WEBKIT];

/// `default-src 'self'; connect-src connect.com`
pub fn connect_policy() -> CspOptions {
    CspOptions::builder()
        .default_src(["'self'"])
        .connect_src(["connect.com"])
        .build()
        .expect("valid options")
}

/// `default-src 'self' domain.com`
pub fn domain_policy() -> CspOptions {
    CspOptions::builder()
        .default_src(["'self'", "domain.com"])
        .build()
        .expect("valid options")
}

/// A policy whose `style-src` picks up the `x-style-nonce` request header.
pub fn dynamic_style_policy() -> CspOptions {
    CspOptions::builder()
        .default_src(["'self'"])
        .script_src(["scripts.biz"])
        .style_src(vec![
            SourceExpr::literal("styles.biz"),
            SourceExpr::dynamic(|ctx| {
                ctx.request()
                    .headers()
                    .get("x-style-nonce")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned()
            }),
        ])
        .object_src(["'none'"])
        .img_src(["data:"])
        .directive("reportUri", DirectiveValue::dynamic(|_| "/report"))
        .build()
        .expect("valid options")
}

pub fn http_request(user_agent: Option<&str>) -> HttpRequest {
    let mut request = TestRequest::get().uri("/");
    if let Some(ua) = user_agent {
        request = request.insert_header(("user-agent", ua));
    }
    request.to_http_request()
}

pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().body("hello world")
}
