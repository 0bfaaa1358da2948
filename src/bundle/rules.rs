//! Asset-transform rules (`module.rules`).
//!
//! | Test                         | Loaders                                   |
//! |------------------------------|-------------------------------------------|
//! | `.css`                       | extract(css-loader), fallback style-loader |
//! | `.less`                      | extract(css-loader, less-loader)          |
//! | `.html`                      | html-loader, no minimize                  |
//! | fonts, `.svg`                | file-loader -> `assets/fonts/`            |
//! | `.png` `.jpg` `.gif`         | url-loader (8 KiB inline) -> `assets/images/` |
//! | `.js`                        | babel-loader                              |
//! | `.vue`                       | vue-loader with extracted CSS             |

use regex::Regex;
use serde::Serialize;
use serde_json::json;

use super::BundleError;

const NODE_MODULES: &str = "node_modules";

/// How a matched module is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LoaderUse {
    /// Loader request string, query included.
    Name(String),
    /// Loader with an options object.
    Options {
        loader: String,
        options: serde_json::Value,
    },
    /// Styles pulled into a separate file by the extract-styles plugin.
    Extract {
        #[serde(rename = "extractStyles")]
        extract: ExtractStyles,
    },
}

impl LoaderUse {
    pub fn name(loader: &str) -> Self {
        Self::Name(loader.to_string())
    }

    pub fn extract(fallback: &str, loaders: &[&str]) -> Self {
        Self::Extract {
            extract: ExtractStyles {
                fallback: fallback.to_string(),
                loaders: loaders.iter().map(|l| (*l).to_string()).collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractStyles {
    /// Loader used when extraction is disabled.
    pub fallback: String,
    #[serde(rename = "use")]
    pub loaders: Vec<String>,
}

/// One entry of `module.rules`.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Regex source matched against module paths.
    pub test: String,

    /// Regex source of paths the rule never applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,

    #[serde(rename = "use")]
    pub loaders: Vec<LoaderUse>,
}

impl Rule {
    /// Build a rule, rejecting a `test` pattern that is not a valid regex.
    pub fn new(test: &str, loaders: Vec<LoaderUse>) -> Result<Self, BundleError> {
        compile(test)?;
        Ok(Self {
            test: test.to_string(),
            exclude: None,
            loaders,
        })
    }

    pub fn exclude(mut self, pattern: &str) -> Result<Self, BundleError> {
        compile(pattern)?;
        self.exclude = Some(pattern.to_string());
        Ok(self)
    }
}

fn compile(pattern: &str) -> Result<Regex, BundleError> {
    Regex::new(pattern).map_err(|source| BundleError::Rule {
        pattern: pattern.to_string(),
        source,
    })
}

/// The fixed rule list.
pub fn module_rules() -> Result<Vec<Rule>, BundleError> {
    let vue_css = LoaderUse::extract("vue-style-loader", &["css-loader"]);

    Ok(vec![
        Rule::new(r"\.css$", vec![LoaderUse::extract("style-loader", &["css-loader"])])?,
        Rule::new(
            r"\.less$",
            vec![LoaderUse::extract("style-loader", &["css-loader", "less-loader"])],
        )?,
        // keep markup intact, minimizing breaks template attributes
        Rule::new(r"\.html$", vec![LoaderUse::name("html-loader?-minimize")])?,
        Rule::new(
            r"\.(woff|woff2|ttf|eot|svg)(\?v=[0-9]\.[0-9]\.[0-9])?$",
            vec![LoaderUse::name("file-loader?name=assets/fonts/[name].[ext]")],
        )?,
        Rule::new(
            r"\.(png|jpe?g|gif)$",
            vec![LoaderUse::name(
                "url-loader?limit=8192&name=assets/images/[name]-[hash].[ext]",
            )],
        )?,
        Rule::new(r"\.js$", vec![LoaderUse::name("babel-loader")])?.exclude(NODE_MODULES)?,
        Rule::new(
            r"\.vue$",
            vec![LoaderUse::Options {
                loader: "vue-loader".into(),
                options: json!({
                    "sourceMap": true,
                    "loaders": { "css": vue_css },
                    "postLoaders": { "html": "babel-loader" },
                }),
            }],
        )?
        .exclude(NODE_MODULES)?,
    ])
}
