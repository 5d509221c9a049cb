use std::collections::HashMap;

use url::Url;

use crate::descriptor::*;
use crate::error::*;
use crate::util;

pub const ARG_EXT: &str = "ext";
pub const ARG_TIM: &str = "tim";

/// Per-media metadata as reported by the remote API.
pub type EndpointArgs = HashMap<String, String>;

/// Maps an original file extension (no leading dot) to its thumbnail extension (with leading dot).
pub type ThumbnailExtensionFn = fn(&str) -> &'static str;

/// Thumbnail naming used by stock vichan.
pub fn vichan_thumbnail_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" => ".jpg",
        "jpeg" => ".jpeg",
        "png" => ".png",
        "gif" => ".gif",
        _ => ".jpg",
    }
}

/// Best-effort guess for sites whose thumbnailer does not map extensions 1:1.
/// Some jpg uploads still end up with png thumbnails, so the result may 404.
pub fn guessing_thumbnail_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" => ".jpg",
        "jpeg" => ".jpeg",
        "webm" | "mp4" | "gif" => ".gif",
        _ => ".png",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaArgs<'a> {
    pub ext: &'a str,
    pub tim: &'a str,
}

impl<'a> MediaArgs<'a> {
    /// Missing `ext`/`tim` is a caller error. Empty values are passed through as is.
    pub fn from_args(args: &'a EndpointArgs) -> Result<Self, SiteError> {
        Ok(Self {
            ext: required_arg(args, ARG_EXT)?,
            tim: required_arg(args, ARG_TIM)?,
        })
    }
}

fn required_arg<'a>(args: &'a EndpointArgs, key: &'static str) -> Result<&'a str, SiteError> {
    args.get(key)
        .map(String::as_str)
        .ok_or(SiteError::MalformedEndpointArgs(key.into()))
}

pub struct Endpoints {
    root: Url,
    api_root: Url,
    media_root: Url,
    thumbnail_extension: ThumbnailExtensionFn,
    spoilers: bool,
}

impl Endpoints {
    pub fn new(root: Url, api_root: Url, media_root: Url, thumbnail_extension: ThumbnailExtensionFn) -> Self {
        Self {
            root,
            api_root,
            media_root,
            thumbnail_extension,
            spoilers: false,
        }
    }

    /// Serve spoiler placeholders for spoilered media instead of the real thumbnail.
    pub fn with_spoilers(mut self, spoilers: bool) -> Self {
        self.spoilers = spoilers;
        self
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    pub fn media_root(&self) -> &Url {
        &self.media_root
    }

    pub fn catalog(&self, board: &BoardDescriptor) -> Url {
        util::with_segments(&self.api_root, &[board.board_code(), "catalog.json"])
    }

    pub fn thread(&self, thread: &ThreadDescriptor) -> Url {
        let file_name = format!("{}.json", thread.thread_no());

        util::with_segments(&self.api_root, &[thread.board_code(), "res", &file_name])
    }

    pub fn pages(&self, board: &BoardDescriptor) -> Url {
        util::with_segments(&self.api_root, &[board.board_code(), "threads.json"])
    }

    pub fn boards(&self) -> Url {
        util::with_segments(&self.api_root, &["boards.json"])
    }

    pub fn image(&self, board: &BoardDescriptor, args: &EndpointArgs) -> Result<Url, SiteError> {
        let media = MediaArgs::from_args(args)?;
        let file_name = format!("{}.{}", media.tim, media.ext);

        Ok(util::with_segments(&self.media_root, &[board.board_code(), "src", &file_name]))
    }

    /// `spoiler` and `spoiler_variant` only have an effect when spoilers are enabled.
    pub fn thumbnail(
        &self,
        board: &BoardDescriptor,
        spoiler: bool,
        spoiler_variant: u32,
        args: &EndpointArgs,
    ) -> Result<Url, SiteError> {
        let media = MediaArgs::from_args(args)?;

        if spoiler && self.spoilers {
            return Ok(self.spoiler(spoiler_variant));
        }

        let file_name = format!("{}{}", media.tim, (self.thumbnail_extension)(media.ext));

        Ok(util::with_segments(&self.media_root, &[board.board_code(), "thumb", &file_name]))
    }

    fn spoiler(&self, variant: u32) -> Url {
        let file_name = if variant > 0 {
            format!("spoiler{variant}.png")
        } else {
            "spoiler.png".to_owned()
        };

        util::with_segments(&self.media_root, &["static", &file_name])
    }

    pub fn flag_icon(&self, country_code: &str) -> Url {
        let file_name = format!("{}.png", country_code.to_lowercase());

        util::with_segments(&self.root, &["static", "flags", &file_name])
    }

    pub fn reply(&self, _descriptor: &ChanDescriptor) -> Url {
        util::with_segments(&self.root, &["post.php"])
    }

    pub fn delete(&self, _post: &PostDescriptor) -> Url {
        util::with_segments(&self.root, &["post.php"])
    }
}

impl std::fmt::Debug for Endpoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoints")
            .field("root", &self.root.as_str())
            .field("api_root", &self.api_root.as_str())
            .field("media_root", &self.media_root.as_str())
            .field("spoilers", &self.spoilers)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(thumbnail_extension: ThumbnailExtensionFn) -> Endpoints {
        let root = util::parse_base_url("https://example.tld/").unwrap();

        Endpoints::new(root.clone(), root.clone(), root, thumbnail_extension)
    }

    fn args(pairs: &[(&str, &str)]) -> EndpointArgs {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn board() -> BoardDescriptor {
        BoardDescriptor::create("test", "a")
    }

    #[test]
    fn guessing_rule_table() {
        let cases = [
            ("jpg", ".jpg"),
            ("jpeg", ".jpeg"),
            ("webm", ".gif"),
            ("mp4", ".gif"),
            ("gif", ".gif"),
            ("png", ".png"),
            ("unknownformat", ".png"),
            ("JPG", ".png"),
            ("", ".png"),
        ];

        for (ext, expected) in cases {
            assert_eq!(guessing_thumbnail_extension(ext), expected, "ext = {ext:?}");
        }
    }

    #[test]
    fn vichan_rule_table() {
        assert_eq!(vichan_thumbnail_extension("png"), ".png");
        assert_eq!(vichan_thumbnail_extension("jpeg"), ".jpeg");
        assert_eq!(vichan_thumbnail_extension("webm"), ".jpg");
    }

    #[test]
    fn thumbnail_url_uses_extension_rule() {
        let endpoints = endpoints(guessing_thumbnail_extension);

        let url = endpoints
            .thumbnail(&board(), false, 0, &args(&[("ext", "webm"), ("tim", "169000")]))
            .unwrap();

        assert_eq!(url.as_str(), "https://example.tld/a/thumb/169000.gif");
    }

    #[test]
    fn thumbnail_url_requires_ext_and_tim() {
        let endpoints = endpoints(guessing_thumbnail_extension);

        let missing_ext = endpoints.thumbnail(&board(), false, 0, &args(&[("tim", "169000")]));
        let missing_tim = endpoints.thumbnail(&board(), false, 0, &args(&[("ext", "png")]));

        assert!(matches!(missing_ext, Err(SiteError::MalformedEndpointArgs(ref key)) if key == "ext"));
        assert!(matches!(missing_tim, Err(SiteError::MalformedEndpointArgs(ref key)) if key == "tim"));
    }

    #[test]
    fn empty_ext_falls_back_to_png_thumbnail() {
        let endpoints = endpoints(guessing_thumbnail_extension);

        let url = endpoints
            .thumbnail(&board(), false, 0, &args(&[("ext", ""), ("tim", "169000")]))
            .unwrap();

        assert_eq!(url.as_str(), "https://example.tld/a/thumb/169000.png");
    }

    #[test]
    fn spoiler_is_ignored_without_spoiler_support() {
        let endpoints = endpoints(guessing_thumbnail_extension);
        let args = args(&[("ext", "jpg"), ("tim", "1")]);

        assert_eq!(
            endpoints.thumbnail(&board(), true, 3, &args).unwrap().as_str(),
            "https://example.tld/a/thumb/1.jpg"
        );
    }

    #[test]
    fn spoiler_placeholder_with_spoiler_support() {
        let endpoints = endpoints(vichan_thumbnail_extension).with_spoilers(true);
        let args = args(&[("ext", "jpg"), ("tim", "1")]);

        assert_eq!(
            endpoints.thumbnail(&board(), true, 0, &args).unwrap().as_str(),
            "https://example.tld/static/spoiler.png"
        );
        assert_eq!(
            endpoints.thumbnail(&board(), true, 2, &args).unwrap().as_str(),
            "https://example.tld/static/spoiler2.png"
        );
        assert_eq!(
            endpoints.thumbnail(&board(), false, 2, &args).unwrap().as_str(),
            "https://example.tld/a/thumb/1.jpg"
        );
    }

    #[test]
    fn api_endpoints() {
        let endpoints = endpoints(vichan_thumbnail_extension);
        let thread = ThreadDescriptor::new(board(), 12345).unwrap();

        assert_eq!(endpoints.catalog(&board()).as_str(), "https://example.tld/a/catalog.json");
        assert_eq!(endpoints.thread(&thread).as_str(), "https://example.tld/a/res/12345.json");
        assert_eq!(endpoints.pages(&board()).as_str(), "https://example.tld/a/threads.json");
        assert_eq!(endpoints.boards().as_str(), "https://example.tld/boards.json");
        assert_eq!(
            endpoints
                .image(&board(), &args(&[("ext", "webm"), ("tim", "169000")]))
                .unwrap()
                .as_str(),
            "https://example.tld/a/src/169000.webm"
        );
        assert_eq!(
            endpoints.reply(&ChanDescriptor::Thread(thread.clone())).as_str(),
            "https://example.tld/post.php"
        );
        assert_eq!(
            endpoints.delete(&PostDescriptor::new(thread, 12346)).as_str(),
            "https://example.tld/post.php"
        );
        assert_eq!(endpoints.flag_icon("LT").as_str(), "https://example.tld/static/flags/lt.png");
    }
}
