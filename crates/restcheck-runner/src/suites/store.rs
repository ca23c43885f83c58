//! Checks against the fake e-commerce store API
//!
//! Covers products, users, carts, and login. The login endpoint takes
//! credentials as JSON body fields; that is the external API's contract.
//! Expected statuses are the service's documented ones, including the
//! 201 it returns for a successful login.

use serde_json::json;

use restcheck_core::expect::ExpectationSet;
use restcheck_core::request::RequestSpec;

use crate::case::Case;
use crate::datagen;
use crate::suite::Suite;

/// Fixed demo account the service documents for login checks.
const KNOWN_USERNAME: &str = "mor_2314";
const KNOWN_PASSWORD: &str = "83r5^_";

#[must_use]
pub fn suite(base_url: &str) -> Suite {
    let base = base_url.trim_end_matches('/').to_string();
    let mut cases = Vec::new();

    {
        let base = base.clone();
        cases.push(Case::new("GET /products/1 returns the product", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/products/1")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({"id": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("PUT /products/1 updates an existing product", move |ctx| {
            let rng = ctx.rng();
            let updated = json!({
                "title": datagen::words(rng, 3),
                "price": 199.99,
                "description": datagen::sentence(rng),
                "image": datagen::image_url(rng, 640, 480),
                "category": "jewelery",
            });
            let spec = RequestSpec::put(format!("{base}/products/1"))
                .json(updated.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({
                    "title": updated["title"],
                    "price": updated["price"],
                }))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("GET /users/1 returns a user", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/users/1")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({"id": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /users creates a user", move |ctx| {
            let rng = ctx.rng();
            let new_user = json!({
                "email": datagen::email(rng),
                "username": datagen::username(rng),
                "password": datagen::password(rng, 12),
                "name": {
                    "firstname": datagen::first_name(rng),
                    "lastname": datagen::last_name(rng),
                },
                "address": {
                    "city": datagen::city(rng),
                    "street": datagen::street(rng),
                    "number": datagen::int_in_range(rng, 1, 125),
                    "zipcode": datagen::zip_code(rng),
                    "geolocation": {
                        "lat": datagen::latitude(rng),
                        "long": datagen::longitude(rng),
                    },
                },
                "phone": datagen::phone_number(rng),
            });
            let spec = RequestSpec::post(format!("{base}/users"))
                .json(new_user)
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new()
                    .status(201)
                    .json_like(&json!({"id": {"$pattern": "^\\d+$"}}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("PUT /users/1 updates a user", move |ctx| {
            let rng = ctx.rng();
            let updated = json!({
                "email": datagen::email(rng),
                "username": datagen::username(rng),
                "password": datagen::password(rng, 12),
                "name": {
                    "firstname": datagen::first_name(rng),
                    "lastname": datagen::last_name(rng),
                },
                "phone": datagen::phone_number(rng),
            });
            let spec = RequestSpec::put(format!("{base}/users/1"))
                .json(updated.clone())
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({
                    "username": updated["username"],
                    "email": updated["email"],
                }))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("GET /carts/1 returns a cart", move |ctx| {
            let spec = RequestSpec::get(format!("{base}/carts/1")).build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({"id": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /carts creates a cart", move |ctx| {
            let rng = ctx.rng();
            let new_cart = json!({
                "userId": 1,
                "date": datagen::iso_timestamp(rng),
                "products": [
                    {"productId": 1, "quantity": datagen::int_in_range(rng, 1, 5)},
                    {"productId": 2, "quantity": datagen::int_in_range(rng, 1, 5)},
                ],
            });
            let spec = RequestSpec::post(format!("{base}/carts"))
                .json(new_cart)
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(201).json_like(&json!({"userId": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("PUT /carts/1 updates a cart", move |ctx| {
            let rng = ctx.rng();
            let updated = json!({
                "userId": 1,
                "date": datagen::iso_timestamp(rng),
                "products": [{"productId": 3, "quantity": 5}],
            });
            let spec = RequestSpec::put(format!("{base}/carts/1"))
                .json(updated)
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new().status(200).json_like(&json!({"userId": 1}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /auth/login returns a token for valid credentials", move |ctx| {
            let spec = RequestSpec::post(format!("{base}/auth/login"))
                .json(json!({
                    "username": KNOWN_USERNAME,
                    "password": KNOWN_PASSWORD,
                }))
                .build()?;
            ctx.check(
                spec,
                ExpectationSet::new()
                    .status(201)
                    .json_like(&json!({"token": {"$pattern": "\\w+"}}))?,
            )?;
            Ok(())
        }));
    }

    {
        let base = base.clone();
        cases.push(Case::new("POST /auth/login rejects invalid credentials", move |ctx| {
            let rng = ctx.rng();
            let spec = RequestSpec::post(format!("{base}/auth/login"))
                .json(json!({
                    "username": datagen::username(rng),
                    "password": datagen::password(rng, 16),
                }))
                .build()?;
            // The 401 is the passing outcome here.
            ctx.check(spec, ExpectationSet::new().status(401))?;
            Ok(())
        }));
    }

    Suite::new("store", cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suite_shape() {
        let suite = suite("https://fakestoreapi.com");
        assert_eq!(suite.name(), "store");
        assert_eq!(suite.len(), 10);
    }

    #[test]
    fn trailing_slash_is_normalized() {
        // Would otherwise produce "//products/1" URLs.
        let suite = suite("https://fakestoreapi.com/");
        assert_eq!(suite.len(), 10);
    }
}
