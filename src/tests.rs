mod test_eval {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn number() {
        let num = Expr::from(42);
        assert_eq!(num.evaluate(&Context::new()), Ok(Number::Int(42)));
        assert_eq!(num.to_string(), "42");
    }

    #[test]
    fn symbol_with_context() {
        let sym = Expr::var("x");
        let ctx: Context = [("x", 10)].into_iter().collect();
        assert_eq!(sym.evaluate(&ctx), Ok(Number::Int(10)));
        assert_eq!(sym.to_string(), "x");
    }

    #[test_case(BinOp::Add, Number::Int(15))]
    #[test_case(BinOp::Sub, Number::Int(5))]
    #[test_case(BinOp::Mul, Number::Int(50))]
    #[test_case(BinOp::Div, Number::from(2.0))]
    #[test_case(BinOp::Pow, Number::Int(100_000))]
    fn binary_operations(op: BinOp, expected: Number) {
        let e = Expr::binary(op, Expr::from(10), Expr::from(5));
        assert_eq!(e.evaluate(&Context::new()), Ok(expected));
    }

    #[test]
    fn unary_minus() {
        let e = Expr::neg(Expr::from(5));
        assert_eq!(e.evaluate(&Context::new()), Ok(Number::Int(-5)));
        assert_eq!(e.to_string(), "(-5)");
    }

    #[test]
    fn mixed_numbers_and_symbols() {
        let e = Expr::var("a") * Expr::from(2);
        let ctx: Context = [("a", 4)].into_iter().collect();
        assert_eq!(e.evaluate(&ctx), Ok(Number::Int(8)));
        assert_eq!(e.to_string(), "(a * 2)");
    }

    #[test]
    fn nested() {
        // 5 + (x * 2) with x = 4
        let e = Expr::from(5) + Expr::var("x") * Expr::from(2);
        let ctx: Context = [("x", 4)].into_iter().collect();
        assert_eq!(e.evaluate(&ctx), Ok(Number::Int(13)));
    }

    #[test]
    fn sum_function() {
        let e = Expr::sum([Expr::from(1), Expr::from(2), Expr::from(3)]);
        assert_eq!(e.evaluate(&Context::new()), Ok(Number::Int(6)));
        assert_eq!(e.to_string(), "sum(1, 2, 3)");

        let e = Expr::sum([Expr::from(2), Expr::var("x")]);
        let ctx: Context = [("x", 5)].into_iter().collect();
        assert_eq!(e.evaluate(&ctx), Ok(Number::Int(7)));
    }

    #[test]
    fn empty_sum_is_zero() {
        assert_eq!(
            Expr::sum([]).evaluate(&Context::new()),
            Ok(Number::Int(0))
        );
    }
}

mod test_functions {
    use crate::prelude::*;
    use std::f64::consts;
    use test_case::test_case;

    #[test_case(Expr::sin(Expr::from(consts::FRAC_PI_2)), 1.0; "sin")]
    #[test_case(Expr::cos(Expr::from(0)), 1.0; "cos")]
    #[test_case(Expr::tan(Expr::from(0)), 0.0; "tan")]
    #[test_case(Expr::exp(Expr::from(1)), consts::E; "exp")]
    #[test_case(Expr::ln(Expr::from(consts::E)), 1.0; "ln")]
    #[test_case(Expr::log(Expr::from(100)), 100f64.ln(); "log natural")]
    #[test_case(Expr::log_base(Expr::from(8), Expr::from(2)), 3.0; "log base 2")]
    #[test_case(Expr::sqrt(Expr::from(16)), 4.0; "sqrt")]
    fn math_functions(e: Expr, expected: f64) {
        let v = e.evaluate(&Context::new()).unwrap();
        assert!(
            (v.to_f64() - expected).abs() < 1e-9,
            "{e} evaluated to {v}, expected {expected}"
        );
    }

    #[test]
    fn chained_through_context() {
        // sin(x)^2 + cos(x)^2 = 1 for any x
        let x = Expr::var("x");
        let e = Expr::sin(&x).pow(Expr::from(2)) + Expr::cos(&x).pow(Expr::from(2));
        let ctx: Context = [("x", 0.7)].into_iter().collect();
        let v = e.evaluate(&ctx).unwrap();
        assert!((v.to_f64() - 1.0).abs() < 1e-9);
    }
}

mod test_derivative {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test_case(Expr::sin(x()), "(cos(x) * 1)"; "sin")]
    #[test_case(Expr::cos(x()), "((-1 * sin(x)) * 1)"; "cos")]
    #[test_case(Expr::exp(x()), "(exp(x) * 1)"; "exp")]
    #[test_case(Expr::ln(x()), "((1 / x) * 1)"; "ln")]
    #[test_case(Expr::tan(x()), "((1 / (cos(x) ^ 2)) * 1)"; "tan")]
    #[test_case(Expr::sqrt(x()), "((1 / (2 * sqrt(x))) * 1)"; "sqrt")]
    fn function_rules_raw(e: Expr, res: &str) {
        assert_eq!(e.derivative("x").unwrap().to_string(), res);
    }

    #[test]
    fn simplified_function_rules() {
        let d = |e: &Expr| e.derivative("x").unwrap().simplify();

        assert_eq!(d(&Expr::sin(x())), Expr::cos(x()));
        assert_eq!(d(&Expr::exp(x())), Expr::exp(x()));
        assert_eq!(d(&Expr::ln(x())), Expr::one() / x());
    }

    #[test]
    fn numeric_check_against_difference_quotient() {
        // f(x) = x^3 + sin(x) * x, f'(2) via symbols vs. finite differences
        let f = x().pow(Expr::from(3)) + Expr::sin(x()) * x();
        let df = f.derivative("x").unwrap();

        let at = |e: &Expr, v: f64| {
            let ctx: Context = [("x", v)].into_iter().collect();
            e.evaluate(&ctx).unwrap().to_f64()
        };

        let h = 1e-6;
        let approx = (at(&f, 2.0 + h) - at(&f, 2.0 - h)) / (2.0 * h);
        assert!((at(&df, 2.0) - approx).abs() < 1e-4);
    }
}

mod test_serde {
    use crate::prelude::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expr_round_trips() {
        let e = Expr::sin(Expr::var("x")) * Expr::from(2) + Expr::from(0.5);
        let json = serde_json::to_string(&e).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
