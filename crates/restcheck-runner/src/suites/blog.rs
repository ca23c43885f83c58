//! Checks against the fake blog API
//!
//! Authors own articles, articles own comments. Writes are echoed back
//! without persisting, so create/update cases assert on the echo and
//! list cases on the seeded data's shape.

use rand::Rng;
use serde_json::{Value, json};

use restcheck_core::expect::ExpectationSet;
use restcheck_core::request::RequestSpec;

use crate::case::Case;
use crate::datagen;
use crate::suite::Suite;

fn author_payload(rng: &mut impl Rng) -> Value {
    json!({
        "author": {
            "name": datagen::full_name(rng),
            "email": datagen::email(rng),
            "avatar": datagen::image_url(rng, 100, 100),
        }
    })
}

fn article_payload(rng: &mut impl Rng) -> Value {
    json!({
        "article": {
            "title": datagen::sentence(rng),
            "body": datagen::paragraph(rng),
            "views": datagen::int_in_range(rng, 0, 1000),
            "likes": datagen::int_in_range(rng, 0, 1000),
        }
    })
}

fn comment_payload(rng: &mut impl Rng) -> Value {
    json!({
        "comment": {
            "body": datagen::sentences(rng, 2),
            "written_by": datagen::full_name(rng),
        }
    })
}

#[must_use]
pub fn suite(base_url: &str) -> Suite {
    let base = base_url.trim_end_matches('/').to_string();
    let mut cases = Vec::new();

    {
        let base = base.clone();
        cases.push(Case::new("GET /authors lists authors", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/authors")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!([{
                    "id": {"$type": "number"},
                    "name": {"$type": "string"},
                    "email": {"$type": "string"},
                }]))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("GET /authors/1 returns a specific author", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/authors/1")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({"id": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /authors echoes the created author", move |ctx| {
            let payload = author_payload(ctx.rng());
            let spec = RequestSpec::post(format!("{base}/authors"))
                .json(payload.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new()
                    .status(201)
                    .json_like(&json!({"author": payload["author"]}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("PUT /authors/2 echoes the updated author", move |ctx| {
            let payload = author_payload(ctx.rng());
            let spec = RequestSpec::put(format!("{base}/authors/2"))
                .json(payload.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new()
                    .status(200)
                    .json_like(&json!({"author": payload["author"]}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("DELETE /authors/3 answers 200", move |ctx| {
            let spec = RequestSpec::delete(format!("{base}/authors/3")).build()?;
            ctx.check(spec, ExpectationSet::new().status(200))?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("GET /authors/1/articles lists the author's articles", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/authors/1/articles")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!([{
                    "id": {"$type": "number"},
                    "title": {"$type": "string"},
                    "body": {"$type": "string"},
                    "author_id": 1,
                }]))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /authors/1/articles echoes the created article", move |ctx| {
            let payload = article_payload(ctx.rng());
            let spec = RequestSpec::post(format!("{base}/authors/1/articles"))
                .json(payload.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(201).json_like(&json!({
                    "article": {
                        "title": payload["article"]["title"],
                        "body": payload["article"]["body"],
                    }
                }))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("GET /articles/1/comments lists comments", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/articles/1/comments")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!([{
                    "id": {"$type": "number"},
                    "body": {"$type": "string"},
                    "written_by": {"$type": "string"},
                }]))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /articles/1/comments echoes the created comment", move |ctx| {
            let payload = comment_payload(ctx.rng());
            let spec = RequestSpec::post(format!("{base}/articles/1/comments"))
                .json(payload.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new()
                    .status(201)
                    .json_like(&json!({"comment": payload["comment"]}))?,
            )?;
            Ok(())
        }));
    }

    Suite::new("blog", cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn suite_shape() {
        let suite = suite("https://thetestrequest.com");
        assert_eq!(suite.name(), "blog");
        assert_eq!(suite.len(), 9);
    }

    #[test]
    fn payloads_nest_under_their_resource_key() {
        let mut rng = SmallRng::seed_from_u64(11);
        assert!(author_payload(&mut rng)["author"]["email"].is_string());
        assert!(article_payload(&mut rng)["article"]["views"].is_number());
        assert!(comment_payload(&mut rng)["comment"]["written_by"].is_string());
    }
}
