//! Local demo storefront for UI scenario tests
//!
//! Serves a small HTML + JS shop with the same screens and selectors as the
//! live storefront: login, product listing with sorting, product details,
//! cart, the two checkout steps, and the order confirmation. Session and cart
//! live in `localStorage`, so every fresh browser profile starts logged out
//! with an empty cart.
//!
//! Each server instance runs on a random available port.

#![allow(dead_code)]

use std::net::SocketAddr;
use tokio::sync::oneshot;
use warp::Filter;

const SHELL: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Swag Labs</title>
<style>
  body { font-family: sans-serif; margin: 0; }
  #header { display: flex; gap: 16px; align-items: center; padding: 8px; background: #eee; }
  .bm-menu { display: none; }
  .bm-menu.open { display: block; }
  #shopping_cart_container { padding: 6px 12px; border: 1px solid #999; cursor: pointer; }
  .inventory_item, .cart_item { display: flex; gap: 12px; padding: 6px; }
  .inventory_item_name { cursor: pointer; color: #18583a; }
  .error-message-container h3 { color: #e2231a; }
  button, input { margin: 4px; }
</style>
</head>
<body>
<div id="root"></div>
<script>
const PRODUCTS = [
  { name: "Sauce Labs Backpack", price: 29.99, desc: "Sly Pack that melds uncompromising style with unequaled laptop and tablet protection." },
  { name: "Sauce Labs Bike Light", price: 9.99, desc: "A red light isn't the desired state in testing but it sure helps when riding your bike at night." },
  { name: "Sauce Labs Bolt T-Shirt", price: 15.99, desc: "Get your testing superhero on with the Sauce Labs bolt T-shirt." },
  { name: "Sauce Labs Fleece Jacket", price: 49.99, desc: "It's not every day that you come across a midweight quarter-zip fleece jacket." },
  { name: "Sauce Labs Onesie", price: 7.99, desc: "Rib snap infant onesie for the junior automation engineer in development." },
  { name: "Test.allTheThings() T-Shirt (Red)", price: 15.99, desc: "This classic Sauce Labs t-shirt is perfect to wear when cozying up to your keyboard." }
];
const USERS = ["standard_user", "locked_out_user"];
const PASSWORD = "secret_sauce";

const slug = name => name.toLowerCase().split(" ").join("-");
const bySlug = s => PRODUCTS.find(p => slug(p.name) === s);
const esc = s => String(s).replace(/[&<>"]/g, c => ({ "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;" }[c]));
const money = n => "$" + n.toFixed(2);
const root = document.getElementById("root");

function session() { return localStorage.getItem("session-username"); }
function cart() { return JSON.parse(localStorage.getItem("cart-contents") || "[]"); }
function saveCart(items) { localStorage.setItem("cart-contents", JSON.stringify(items)); }
function addToCart(s) { const c = cart(); if (!c.includes(s)) { c.push(s); saveCart(c); } }
function removeFromCart(s) { saveCart(cart().filter(x => x !== s)); }
function go(path) { window.location.href = path; }

function header() {
  const count = cart().length;
  const badge = count > 0 ? `<span class="shopping_cart_badge">${count}</span>` : "";
  return `<div id="header">
    <button id="react-burger-menu-btn">Open Menu</button>
    <nav class="bm-menu"><a id="logout_sidebar_link" href="#">Logout</a></nav>
    <span class="app_logo">Swag Labs</span>
    <div id="shopping_cart_container"><a class="shopping_cart_link">Cart ${badge}</a></div>
  </div>`;
}

function wireHeader() {
  document.getElementById("react-burger-menu-btn").onclick = () =>
    document.querySelector(".bm-menu").classList.add("open");
  document.getElementById("logout_sidebar_link").onclick = e => {
    e.preventDefault();
    localStorage.removeItem("session-username");
    localStorage.removeItem("cart-contents");
    go("/");
  };
  document.getElementById("shopping_cart_container").onclick = () => go("/cart.html");
}

function renderLogin(error) {
  const banner = error ? `<h3 data-test="error">Epic sadface: ${esc(error)}</h3>` : "";
  root.innerHTML = `<div class="login_wrapper">
    <input id="user-name" data-test="username" placeholder="Username">
    <input id="password" data-test="password" type="password" placeholder="Password">
    <div class="error-message-container">${banner}</div>
    <input type="submit" id="login-button" data-test="login-button" value="Login">
  </div>`;
  document.getElementById("login-button").onclick = () => {
    const user = document.getElementById("user-name").value;
    const pass = document.getElementById("password").value;
    if (!user) return renderLogin("Username is required");
    if (!pass) return renderLogin("Password is required");
    if (!USERS.includes(user) || pass !== PASSWORD)
      return renderLogin("Username and password do not match any user in this service");
    if (user === "locked_out_user") return renderLogin("Sorry, this user has been locked out.");
    localStorage.setItem("session-username", user);
    go("/inventory.html");
  };
}

const SORTERS = {
  az: (a, b) => (a.name < b.name ? -1 : a.name > b.name ? 1 : 0),
  za: (a, b) => (a.name > b.name ? -1 : a.name < b.name ? 1 : 0),
  lohi: (a, b) => a.price - b.price,
  hilo: (a, b) => b.price - a.price
};

function renderInventory(order) {
  const inCart = cart();
  const items = PRODUCTS.slice().sort(SORTERS[order]).map(p => {
    const s = slug(p.name);
    const button = inCart.includes(s)
      ? `<button data-test="remove-${s}" data-slug="${s}" class="cart-toggle">Remove</button>`
      : `<button data-test="add-to-cart-${s}" data-slug="${s}" class="cart-toggle">Add to cart</button>`;
    return `<div class="inventory_item">
      <div class="inventory_item_name" data-slug="${s}">${esc(p.name)}</div>
      <div class="inventory_item_desc">${esc(p.desc)}</div>
      <div class="inventory_item_price">${money(p.price)}</div>
      ${button}
    </div>`;
  }).join("");
  root.innerHTML = header() + `
    <select class="product_sort_container" data-test="product-sort-container">
      <option value="az">Name (A to Z)</option>
      <option value="za">Name (Z to A)</option>
      <option value="lohi">Price (low to high)</option>
      <option value="hilo">Price (high to low)</option>
    </select>
    <div class="inventory_list">${items}</div>`;
  wireHeader();
  const select = document.querySelector(".product_sort_container");
  select.value = order;
  select.onchange = () => renderInventory(select.value);
  document.querySelectorAll(".cart-toggle").forEach(b => b.onclick = () => {
    const s = b.dataset.slug;
    if (cart().includes(s)) removeFromCart(s); else addToCart(s);
    renderInventory(order);
  });
  document.querySelectorAll(".inventory_item_name").forEach(n => n.onclick = () =>
    go("/inventory-item.html?id=" + encodeURIComponent(n.dataset.slug)));
}

function renderDetails() {
  const s = new URLSearchParams(window.location.search).get("id");
  const p = bySlug(s);
  if (!p) { root.innerHTML = header() + `<div class="inventory_details_name">ITEM NOT FOUND</div>`; wireHeader(); return; }
  const button = cart().includes(s)
    ? `<button data-test="remove">Remove</button>`
    : `<button data-test="add-to-cart">Add to cart</button>`;
  root.innerHTML = header() + `
    <button data-test="back-to-products">Back to products</button>
    <div class="inventory_details">
      <div class="inventory_details_name">${esc(p.name)}</div>
      <div class="inventory_details_desc">${esc(p.desc)}</div>
      <div class="inventory_details_price">${money(p.price)}</div>
      ${button}
    </div>`;
  wireHeader();
  document.querySelector('[data-test="back-to-products"]').onclick = () => go("/inventory.html");
  const toggle = document.querySelector('[data-test="add-to-cart"], [data-test="remove"]');
  toggle.onclick = () => {
    if (cart().includes(s)) removeFromCart(s); else addToCart(s);
    renderDetails();
  };
}

function cartRows(removable) {
  return cart().map(s => {
    const p = bySlug(s);
    const remove = removable ? `<button data-test="remove-${s}" data-slug="${s}" class="cart-remove">Remove</button>` : "";
    return `<div class="cart_item">
      <div class="cart_quantity">1</div>
      <div class="inventory_item_name">${esc(p.name)}</div>
      <div class="inventory_item_price">${money(p.price)}</div>
      ${remove}
    </div>`;
  }).join("");
}

function renderCart() {
  root.innerHTML = header() + `
    <div class="cart_list">${cartRows(true)}</div>
    <button data-test="continue-shopping">Continue Shopping</button>
    <button data-test="checkout">Checkout</button>`;
  wireHeader();
  document.querySelectorAll(".cart-remove").forEach(b => b.onclick = () => {
    removeFromCart(b.dataset.slug);
    renderCart();
  });
  document.querySelector('[data-test="continue-shopping"]').onclick = () => go("/inventory.html");
  document.querySelector('[data-test="checkout"]').onclick = () => go("/checkout-step-one.html");
}

function renderCheckoutInfo(error) {
  const banner = error ? `<h3 data-test="error">Error: ${esc(error)}</h3>` : "";
  const keep = id => { const el = document.getElementById(id); return el ? esc(el.value) : ""; };
  const first = keep("first-name"), last = keep("last-name"), zip = keep("postal-code");
  root.innerHTML = header() + `
    <div class="checkout_info">
      <input id="first-name" data-test="firstName" placeholder="First Name" value="${first}">
      <input id="last-name" data-test="lastName" placeholder="Last Name" value="${last}">
      <input id="postal-code" data-test="postalCode" placeholder="Zip/Postal Code" value="${zip}">
      <div class="error-message-container">${banner}</div>
    </div>
    <button data-test="cancel">Cancel</button>
    <input type="submit" data-test="continue" value="Continue">`;
  wireHeader();
  document.querySelector('[data-test="cancel"]').onclick = () => go("/cart.html");
  document.querySelector('[data-test="continue"]').onclick = () => {
    const value = id => document.getElementById(id).value.trim();
    if (!value("first-name")) return renderCheckoutInfo("First Name is required");
    if (!value("last-name")) return renderCheckoutInfo("Last Name is required");
    if (!value("postal-code")) return renderCheckoutInfo("Postal Code is required");
    go("/checkout-step-two.html");
  };
}

function renderOverview() {
  const total = cart().reduce((sum, s) => sum + bySlug(s).price, 0);
  root.innerHTML = header() + `
    <div class="cart_list">${cartRows(false)}</div>
    <div class="summary_subtotal_label">Item total: ${money(total)}</div>
    <button data-test="cancel">Cancel</button>
    <button data-test="finish">Finish</button>`;
  wireHeader();
  document.querySelector('[data-test="cancel"]').onclick = () => go("/inventory.html");
  document.querySelector('[data-test="finish"]').onclick = () => {
    saveCart([]);
    go("/checkout-complete.html");
  };
}

function renderComplete() {
  root.innerHTML = header() + `
    <div class="checkout_complete_container">
      <h2 class="complete-header">Thank you for your order!</h2>
      <div class="complete-text">Your order has been dispatched, and will arrive just as fast as the pony can get there!</div>
      <button data-test="back-to-products">Back Home</button>
    </div>`;
  wireHeader();
  document.querySelector('[data-test="back-to-products"]').onclick = () => go("/inventory.html");
}

const PAGES = {
  "/inventory.html": () => renderInventory("az"),
  "/inventory-item.html": renderDetails,
  "/cart.html": renderCart,
  "/checkout-step-one.html": () => renderCheckoutInfo(null),
  "/checkout-step-two.html": renderOverview,
  "/checkout-complete.html": renderComplete
};

const page = PAGES[window.location.pathname];
if (!page) renderLogin(null);
else if (!session()) go("/");
else page();
</script>
</body>
</html>"##;

const PAGES: [&str; 6] = [
    "inventory.html",
    "inventory-item.html",
    "cart.html",
    "checkout-step-one.html",
    "checkout-step-two.html",
    "checkout-complete.html",
];

/// Demo storefront bound to a random local port
pub struct ShopServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ShopServer {
    /// Start a new storefront on a random available port
    pub async fn start() -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let index = warp::path::end().map(|| warp::reply::html(SHELL));
        let screens = warp::path::param::<String>()
            .and(warp::path::end())
            .and_then(|page: String| async move {
                if PAGES.contains(&page.as_str()) {
                    Ok(warp::reply::html(SHELL))
                } else {
                    Err(warp::reject::not_found())
                }
            });

        let routes = warp::get().and(index.or(screens));

        let (addr, server) =
            warp::serve(routes).bind_with_graceful_shutdown(([127, 0, 0, 1], 0), async {
                shutdown_rx.await.ok();
            });

        tokio::spawn(server);

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL, e.g. "http://127.0.0.1:12345"
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Wait for the server to answer before pointing a browser at it
    pub async fn wait_ready(&self) -> anyhow::Result<()> {
        let url = self.url();
        let max_attempts = 10;

        for attempt in 1..=max_attempts {
            match reqwest::get(&url).await {
                Ok(response) if response.status().is_success() => return Ok(()),
                Ok(response) => {
                    println!("Attempt {}: shop returned {}", attempt, response.status());
                }
                Err(e) => println!("Attempt {}: shop not ready - {}", attempt, e),
            }
            if attempt < max_attempts {
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }
        }

        anyhow::bail!("Shop did not become ready after {} attempts", max_attempts)
    }
}

impl Drop for ShopServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
